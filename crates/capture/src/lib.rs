// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Call capture and recording for test assertions.
//!
//! Every call that reaches an intercepted client is appended to a
//! [`CallLedger`] in invocation order. Records keep the request and, once
//! the deferred result settles, its outcome.

mod duration_serde;
mod interaction;
mod log;

pub use interaction::{CallOutcome, CallRecord, CapturedCall};
pub use log::CallLedger;
