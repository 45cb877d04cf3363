// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! Use these accessors instead of calling `std::env::var()` directly.

use std::path::PathBuf;

pub const CLIENTMOCK_CAPTURE_FILE: &str = "CLIENTMOCK_CAPTURE_FILE";

/// `CLIENTMOCK_CAPTURE_FILE`: JSONL file every binding mirrors its settled
/// calls into. Unset or empty disables capture.
pub fn capture_file() -> Option<PathBuf> {
    std::env::var(CLIENTMOCK_CAPTURE_FILE)
        .ok()
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
