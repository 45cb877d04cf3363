// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Captured call data types.

use super::duration_serde;
use clientmock_client::{OperationId, Request, SendResult, ServiceError};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// Outcome of a captured call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CallOutcome {
    /// The deferred result has not settled yet.
    Pending,
    Resolved {
        output: Option<Value>,
    },
    Rejected {
        error: ServiceError,
    },
}

impl CallOutcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, CallOutcome::Pending)
    }
}

impl From<&SendResult> for CallOutcome {
    fn from(result: &SendResult) -> Self {
        match result {
            Ok(output) => CallOutcome::Resolved {
                output: output.clone(),
            },
            Err(error) => CallOutcome::Rejected {
                error: error.clone(),
            },
        }
    }
}

/// One intercepted call.
///
/// The request is immutable once captured. Clones share the same record,
/// so an outcome settled later is visible through every clone.
#[derive(Clone)]
pub struct CallRecord {
    inner: Arc<RecordInner>,
}

struct RecordInner {
    seq: u64,
    timestamp: SystemTime,
    elapsed: Duration,
    request: Request,
    outcome: Mutex<CallOutcome>,
}

impl CallRecord {
    pub(crate) fn new(seq: u64, elapsed: Duration, request: Request) -> Self {
        Self {
            inner: Arc::new(RecordInner {
                seq,
                timestamp: SystemTime::now(),
                elapsed,
                request,
                outcome: Mutex::new(CallOutcome::Pending),
            }),
        }
    }

    /// 1-based position in the ledger.
    pub fn seq(&self) -> u64 {
        self.inner.seq
    }

    pub fn timestamp(&self) -> SystemTime {
        self.inner.timestamp
    }

    /// Time since the ledger was created.
    pub fn elapsed(&self) -> Duration {
        self.inner.elapsed
    }

    pub fn request(&self) -> &Request {
        &self.inner.request
    }

    pub fn operation(&self) -> &OperationId {
        &self.inner.request.operation
    }

    pub fn input(&self) -> &Value {
        &self.inner.request.input
    }

    /// Current outcome (`Pending` until the deferred result settles).
    pub fn outcome(&self) -> CallOutcome {
        self.inner.outcome.lock().clone()
    }

    /// Whether both handles refer to the same captured call.
    pub fn ptr_eq(&self, other: &CallRecord) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn settle(&self, outcome: CallOutcome) {
        *self.inner.outcome.lock() = outcome;
    }

    /// Serializable copy of the record.
    pub fn snapshot(&self) -> CapturedCall {
        CapturedCall {
            seq: self.inner.seq,
            timestamp: self.inner.timestamp,
            elapsed: self.inner.elapsed,
            operation: self.inner.request.operation.clone(),
            input: self.inner.request.input.clone(),
            outcome: self.outcome(),
        }
    }
}

impl fmt::Debug for CallRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallRecord")
            .field("seq", &self.inner.seq)
            .field("operation", &self.inner.request.operation)
            .field("input", &self.inner.request.input)
            .field("outcome", &*self.inner.outcome.lock())
            .finish()
    }
}

/// Serialized form of a [`CallRecord`], one per JSONL line.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CapturedCall {
    /// Sequence number
    pub seq: u64,

    /// Wall-clock timestamp
    pub timestamp: SystemTime,

    /// Elapsed time since capture started
    #[serde(with = "duration_serde")]
    pub elapsed: Duration,

    pub operation: OperationId,

    pub input: Value,

    pub outcome: CallOutcome,
}

#[cfg(test)]
#[path = "interaction_tests.rs"]
mod tests;
