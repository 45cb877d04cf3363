// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clientmock_client::{ClientError, Command, OperationId};
use thiserror::Error;

/// Errors raised while configuring a mock or spy.
///
/// Service failures configured via `rejects` are not errors of this crate;
/// they are delivered to the caller of `send` as [`ServiceError`]s.
///
/// [`ServiceError`]: clientmock_client::ServiceError
#[derive(Debug, Error)]
pub enum MockError {
    #[error("Invalid operation name '{name}': {reason}")]
    InvalidOperation { name: String, reason: String },

    #[error("Invalid regex pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("Failed to open capture file '{path}': {source}")]
    Capture {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Parse an operation name supplied by a test.
pub(crate) fn parse_operation(name: &str) -> Result<OperationId, MockError> {
    OperationId::parse(name).map_err(|error| invalid_operation(name, error))
}

/// Identity of command `C`, rejecting an invalid `C::OPERATION`.
pub(crate) fn command_operation<C: Command>() -> Result<OperationId, MockError> {
    OperationId::of::<C>().map_err(|error| invalid_operation(C::OPERATION, error))
}

fn invalid_operation(name: &str, error: ClientError) -> MockError {
    MockError::InvalidOperation {
        name: name.to_string(),
        reason: match error {
            ClientError::InvalidOperation { reason, .. } => reason,
            other => other.to_string(),
        },
    }
}
