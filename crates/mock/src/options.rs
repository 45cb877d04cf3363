// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Binding options.

use crate::env;
use crate::error::MockError;
use clientmock_capture::CallLedger;
use std::path::PathBuf;

/// Options applied when a mock or spy is created.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MockOptions {
    /// Mirror settled calls into this JSONL file (appending).
    pub capture_file: Option<PathBuf>,
}

impl MockOptions {
    /// Options taken from the environment.
    pub fn from_env() -> Self {
        Self {
            capture_file: env::capture_file(),
        }
    }

    pub fn with_capture_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.capture_file = Some(path.into());
        self
    }

    /// Ledger for a new binding.
    pub(crate) fn ledger(&self) -> Result<CallLedger, MockError> {
        match &self.capture_file {
            None => Ok(CallLedger::new()),
            Some(path) => CallLedger::appending(path).map_err(|source| MockError::Capture {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
