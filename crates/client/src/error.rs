// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client errors and the materialized service error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Errors raised by the client model itself.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid operation name '{name}': {reason}")]
    InvalidOperation { name: String, reason: String },

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Failed to encode command input: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode command output: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Name given to errors built from a bare message.
pub const GENERIC_ERROR_NAME: &str = "Error";

/// An error returned by a service call, real or simulated.
///
/// Built from whatever a test configured: a message, a JSON object of
/// fields, or an existing `ServiceError`. Every form ends up with a name,
/// a message and the remaining fields copied on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Error)]
pub struct ServiceError {
    pub name: String,
    pub message: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ServiceError {
    /// Generic error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_code(self, code: impl Into<String>) -> Self {
        self.with_field("Code", Value::String(code.into()))
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Look up a copied-on field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// AWS-style `Code` field.
    pub fn code(&self) -> Option<&str> {
        self.str_field("Code")
    }

    /// AWS-style `Type` field (e.g. `Sender`).
    pub fn error_type(&self) -> Option<&str> {
        self.str_field("Type")
    }

    /// `$fault` field (`client` or `server`).
    pub fn fault(&self) -> Option<&str> {
        self.str_field("$fault")
    }

    /// `$service` field.
    pub fn service(&self) -> Option<&str> {
        self.str_field("$service")
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

impl Default for ServiceError {
    fn default() -> Self {
        Self {
            name: GENERIC_ERROR_NAME.to_string(),
            message: String::new(),
            fields: Map::new(),
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}: {}", self.name, self.message)
        }
    }
}

impl From<&str> for ServiceError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for ServiceError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<Map<String, Value>> for ServiceError {
    fn from(mut fields: Map<String, Value>) -> Self {
        let mut error = Self::default();
        if let Some(message) = lift(&mut fields, "message") {
            error.message = message;
        }
        if let Some(name) = lift(&mut fields, "name") {
            error.name = name;
        }
        error.fields = fields;
        error
    }
}

/// Take `key` out of `fields` as text. Non-string values keep their JSON
/// form; `null` counts as absent.
fn lift(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key)? {
        Value::String(text) => Some(text),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

impl From<Value> for ServiceError {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self::from(fields),
            Value::String(message) => Self::new(message),
            Value::Null => Self::default(),
            other => Self::new(other.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
