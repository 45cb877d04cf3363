// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Operation identity, typed commands and the request value sent through a client.

use crate::error::ClientError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Name of a remote operation, e.g. `Publish` or `ListTopics`.
///
/// Identities compare by value; two commands with the same operation name
/// are the same operation.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OperationId(Arc<str>);

impl OperationId {
    /// Parse and validate an operation name.
    pub fn parse(name: &str) -> Result<Self, ClientError> {
        validate(name)?;
        Ok(Self(Arc::from(name)))
    }

    /// Identity of a typed command, validated like [`OperationId::parse`].
    pub fn of<C: Command>() -> Result<Self, ClientError> {
        Self::parse(C::OPERATION)
    }

    /// The operation name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn validate(name: &str) -> Result<(), ClientError> {
    let invalid = |reason: &str| ClientError::InvalidOperation {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let mut chars = name.chars();
    match chars.next() {
        None => return Err(invalid("operation name is empty")),
        Some(c) if !c.is_ascii_alphabetic() => {
            return Err(invalid("operation name must start with an ASCII letter"))
        }
        Some(_) => {}
    }
    if let Some(c) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(invalid(&format!("unexpected character {:?}", c)));
    }
    Ok(())
}

impl fmt::Debug for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OperationId({})", self.0)
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for OperationId {
    type Error = ClientError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate(&value)?;
        Ok(Self(Arc::from(value)))
    }
}

impl From<OperationId> for String {
    fn from(value: OperationId) -> Self {
        value.0.to_string()
    }
}

/// A typed command: an operation name plus a serializable input.
///
/// ```ignore
/// #[derive(Serialize)]
/// #[serde(rename_all = "PascalCase")]
/// struct Publish { topic_arn: String, message: String }
///
/// impl Command for Publish {
///     const OPERATION: &'static str = "Publish";
///     type Output = PublishOutput;
/// }
/// ```
pub trait Command: Serialize {
    /// Operation name. Must be a valid [`OperationId`].
    const OPERATION: &'static str;

    /// Response shape returned by the service.
    type Output: DeserializeOwned;
}

/// A single outbound call: which operation, with what input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub operation: OperationId,
    pub input: Value,
}

impl Request {
    /// Create a request from an operation identity and input payload.
    pub fn new(operation: OperationId, input: Value) -> Self {
        Self { operation, input }
    }

    /// Create a request from a typed command.
    ///
    /// Fails with [`ClientError::InvalidOperation`] when `C::OPERATION` is
    /// not a valid operation name.
    pub fn from_command<C: Command>(command: &C) -> Result<Self, ClientError> {
        let operation = OperationId::of::<C>()?;
        let input = serde_json::to_value(command).map_err(ClientError::Encode)?;
        Ok(Self { operation, input })
    }
}

#[cfg(test)]
#[path = "operation_tests.rs"]
mod tests;
