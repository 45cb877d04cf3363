// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Payload matching.
//!
//! A [`Pattern`] mirrors the shape of a JSON payload. Any position may hold
//! a [`ValueMatcher`] instead of a literal; comparison then defers to the
//! matcher's own test. An [`InputFilter`] pairs a pattern with strictness:
//! strict filters require deep equality, partial filters only require the
//! keys they name.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Asymmetric matcher embedded in a pattern.
pub trait ValueMatcher: Send + Sync {
    /// Whether `value` is accepted at this position.
    fn test(&self, value: &Value) -> bool;

    /// Short description for debugging, e.g. `any_string()`.
    fn describe(&self) -> String;
}

/// Expected shape of a payload value.
#[derive(Clone)]
pub enum Pattern {
    /// A scalar (or empty container) compared by value.
    Literal(Value),
    /// An object; key sets must match exactly.
    Object(BTreeMap<String, Pattern>),
    /// An array; lengths must match and elements compare in order.
    Array(Vec<Pattern>),
    /// Defers to a matcher.
    Matcher(Arc<dyn ValueMatcher>),
}

impl Pattern {
    /// Object pattern from key/pattern pairs.
    pub fn object<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Pattern)>,
        K: Into<String>,
    {
        Pattern::Object(entries.into_iter().map(|(k, p)| (k.into(), p)).collect())
    }

    /// Array pattern from element patterns.
    pub fn array<I: IntoIterator<Item = Pattern>>(items: I) -> Self {
        Pattern::Array(items.into_iter().collect())
    }

    /// Pattern deferring to `matcher`.
    pub fn matcher<M: ValueMatcher + 'static>(matcher: M) -> Self {
        Pattern::Matcher(Arc::new(matcher))
    }

    /// Set `key` on an object pattern.
    ///
    /// A non-object pattern is replaced by an object holding only `key`.
    pub fn with(self, key: impl Into<String>, pattern: impl Into<Pattern>) -> Self {
        let mut entries = match self {
            Pattern::Object(entries) => entries,
            _ => BTreeMap::new(),
        };
        entries.insert(key.into(), pattern.into());
        Pattern::Object(entries)
    }

    /// Deep equality, honoring embedded matchers.
    pub fn equals(&self, value: &Value) -> bool {
        match self {
            Pattern::Matcher(m) => m.test(value),
            Pattern::Literal(expected) => literal_eq(expected, value),
            Pattern::Array(items) => value.as_array().is_some_and(|actual| {
                actual.len() == items.len() && items.iter().zip(actual).all(|(p, v)| p.equals(v))
            }),
            Pattern::Object(entries) => value
                .as_object()
                .is_some_and(|actual| actual.len() == entries.len() && object_has(entries, actual)),
        }
    }

    /// Partial match: every key named by an object pattern must be present
    /// with a deeply-equal value; extra keys in `value` are ignored.
    ///
    /// Non-object patterns fall back to [`Pattern::equals`].
    pub fn is_subset_of(&self, value: &Value) -> bool {
        match self {
            Pattern::Object(entries) => value
                .as_object()
                .is_some_and(|actual| object_has(entries, actual)),
            other => other.equals(value),
        }
    }
}

fn object_has(entries: &BTreeMap<String, Pattern>, actual: &Map<String, Value>) -> bool {
    entries
        .iter()
        .all(|(key, pattern)| actual.get(key).is_some_and(|v| pattern.equals(v)))
}

/// Value equality where integer and float forms of one number are equal.
fn literal_eq(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Number(a), Value::Number(b)) => {
            a == b || matches!((a.as_f64(), b.as_f64()), (Some(x), Some(y)) if x == y)
        }
        _ => expected == actual,
    }
}

impl From<Value> for Pattern {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                Pattern::Object(map.into_iter().map(|(k, v)| (k, Pattern::from(v))).collect())
            }
            Value::Array(items) => Pattern::Array(items.into_iter().map(Pattern::from).collect()),
            scalar => Pattern::Literal(scalar),
        }
    }
}

impl From<&str> for Pattern {
    fn from(value: &str) -> Self {
        Pattern::Literal(Value::String(value.to_string()))
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(v) => write!(f, "{}", v),
            Pattern::Object(entries) => f.debug_map().entries(entries.iter()).finish(),
            Pattern::Array(items) => f.debug_list().entries(items.iter()).finish(),
            Pattern::Matcher(m) => f.write_str(&m.describe()),
        }
    }
}

/// Payload filter attached to a rule or a call query.
#[derive(Clone, Debug)]
pub struct InputFilter {
    pattern: Pattern,
    strict: bool,
}

impl InputFilter {
    /// Matches payloads containing at least the keys in `pattern`.
    pub fn partial(pattern: impl Into<Pattern>) -> Self {
        Self {
            pattern: pattern.into(),
            strict: false,
        }
    }

    /// Matches payloads deeply equal to `pattern`.
    pub fn strict(pattern: impl Into<Pattern>) -> Self {
        Self {
            pattern: pattern.into(),
            strict: true,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Whether `input` satisfies this filter.
    pub fn matches(&self, input: &Value) -> bool {
        if self.strict {
            self.pattern.equals(input)
        } else {
            self.pattern.is_subset_of(input)
        }
    }
}

impl From<Value> for InputFilter {
    fn from(value: Value) -> Self {
        Self::partial(value)
    }
}

impl From<Pattern> for InputFilter {
    fn from(pattern: Pattern) -> Self {
        Self::partial(pattern)
    }
}

/// Whether `input` satisfies `filter`; no filter matches everything.
pub fn matches(input: &Value, filter: Option<&InputFilter>) -> bool {
    filter.is_none_or(|f| f.matches(input))
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
