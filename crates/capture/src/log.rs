// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Call ledger implementation.

use crate::interaction::{CallOutcome, CallRecord};
use clientmock_client::{OperationId, Request};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Append-only, invocation-ordered record of intercepted calls.
pub struct CallLedger {
    start: Instant,
    records: Arc<Mutex<Vec<CallRecord>>>,
    file_writer: Option<Arc<Mutex<BufWriter<File>>>>,
}

impl CallLedger {
    /// Create a new in-memory ledger
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            records: Arc::new(Mutex::new(Vec::new())),
            file_writer: None,
        }
    }

    /// Create a ledger that also writes settled calls to a file (JSONL
    /// format). Existing lines are kept, so several ledgers can mirror into
    /// one capture.
    pub fn appending(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            start: Instant::now(),
            records: Arc::new(Mutex::new(Vec::new())),
            file_writer: Some(Arc::new(Mutex::new(BufWriter::new(file)))),
        })
    }

    /// Empty ledger sharing this one's start instant and file mirror.
    ///
    /// Clones made before the call keep the old records.
    pub fn renewed(&self) -> Self {
        Self {
            start: self.start,
            records: Arc::new(Mutex::new(Vec::new())),
            file_writer: self.file_writer.as_ref().map(Arc::clone),
        }
    }

    /// Append a call, assigning the next 1-based sequence number.
    pub fn append(&self, request: Request) -> CallRecord {
        let mut records = self.records.lock();
        let seq = records.len() as u64 + 1;
        let record = CallRecord::new(seq, self.start.elapsed(), request);
        records.push(record.clone());
        record
    }

    /// Store the settled outcome of a call.
    ///
    /// The record is mirrored to the JSONL file, if configured, at this
    /// point rather than on append.
    pub fn settle(&self, record: &CallRecord, outcome: CallOutcome) {
        record.settle(outcome);

        if let Some(ref writer) = self.file_writer {
            use std::io::Write;
            let mut w = writer.lock();
            let written = serde_json::to_string(&record.snapshot())
                .map_err(std::io::Error::from)
                .and_then(|json| {
                    writeln!(w, "{}", json)?;
                    w.flush()
                });
            if let Err(e) = written {
                tracing::warn!(seq = record.seq(), error = %e, "failed to write captured call");
            }
        }
    }

    /// All calls in invocation order
    pub fn all(&self) -> Vec<CallRecord> {
        self.records.lock().clone()
    }

    /// Calls of one operation, in invocation order
    pub fn filter_by_operation(&self, operation: &OperationId) -> Vec<CallRecord> {
        self.filter(|r| r.operation() == operation)
    }

    /// Calls matching a predicate, in invocation order
    pub fn filter<F: Fn(&CallRecord) -> bool>(&self, pred: F) -> Vec<CallRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| pred(r))
            .cloned()
            .collect()
    }

    /// The n-th call (0-indexed)
    pub fn nth(&self, n: usize) -> Option<CallRecord> {
        self.records.lock().get(n).cloned()
    }

    /// Get the total number of calls
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Check if the ledger is empty
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Clear all recorded calls
    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Default for CallLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CallLedger {
    fn clone(&self) -> Self {
        Self {
            start: self.start,
            records: Arc::clone(&self.records),
            file_writer: self.file_writer.as_ref().map(Arc::clone),
        }
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
