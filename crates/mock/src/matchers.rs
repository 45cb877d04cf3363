// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in value matchers for use inside a [`Pattern`].

use crate::error::MockError;
use crate::matcher::{Pattern, ValueMatcher};
use serde_json::Value;
use std::sync::Arc;

type Test = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Matcher backed by a closure.
struct FnMatcher {
    description: String,
    test: Test,
}

impl ValueMatcher for FnMatcher {
    fn test(&self, value: &Value) -> bool {
        (self.test)(value)
    }

    fn describe(&self) -> String {
        self.description.clone()
    }
}

fn from_fn<F>(description: impl Into<String>, test: F) -> Pattern
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Pattern::matcher(FnMatcher {
        description: description.into(),
        test: Arc::new(test),
    })
}

/// Any value except `null`.
pub fn anything() -> Pattern {
    from_fn("anything()", |v| !v.is_null())
}

pub fn any_string() -> Pattern {
    from_fn("any_string()", Value::is_string)
}

pub fn any_number() -> Pattern {
    from_fn("any_number()", Value::is_number)
}

pub fn any_bool() -> Pattern {
    from_fn("any_bool()", Value::is_boolean)
}

pub fn any_array() -> Pattern {
    from_fn("any_array()", Value::is_array)
}

pub fn any_object() -> Pattern {
    from_fn("any_object()", Value::is_object)
}

/// Deeply equal to `value`, even inside a partial filter.
pub fn exact(value: Value) -> Pattern {
    let pattern = Pattern::from(value);
    let description = format!("exact({:?})", pattern);
    from_fn(description, move |v| pattern.equals(v))
}

/// A string containing `needle`.
pub fn string_containing(needle: impl Into<String>) -> Pattern {
    let needle = needle.into();
    from_fn(format!("string_containing({:?})", needle), move |v| {
        v.as_str().is_some_and(|s| s.contains(needle.as_str()))
    })
}

/// A string matching the regular expression `pattern`.
pub fn string_matching(pattern: &str) -> Result<Pattern, MockError> {
    let re = regex::Regex::new(pattern)?;
    Ok(from_fn(format!("string_matching({:?})", pattern), move |v| {
        v.as_str().is_some_and(|s| re.is_match(s))
    }))
}

/// A string matching the glob `pattern`, e.g. `arn:aws:sns:*:MyTopic`.
pub fn string_glob(pattern: &str) -> Result<Pattern, MockError> {
    let glob = glob::Pattern::new(pattern)?;
    Ok(from_fn(format!("string_glob({:?})", pattern), move |v| {
        v.as_str().is_some_and(|s| glob.matches(s))
    }))
}

/// An object containing at least the keys of `pattern`.
///
/// Lifts partial matching to a nested position.
pub fn object_containing(pattern: impl Into<Pattern>) -> Pattern {
    let pattern = pattern.into();
    let description = format!("object_containing({:?})", pattern);
    from_fn(description, move |v| {
        v.is_object() && pattern.is_subset_of(v)
    })
}

/// An array with, for each of `items`, at least one element it equals.
pub fn array_containing<I: IntoIterator<Item = Pattern>>(items: I) -> Pattern {
    let items: Vec<Pattern> = items.into_iter().collect();
    let description = format!("array_containing({:?})", items);
    from_fn(description, move |v| {
        v.as_array().is_some_and(|actual| {
            items
                .iter()
                .all(|expected| actual.iter().any(|element| expected.equals(element)))
        })
    })
}

/// Arbitrary predicate.
pub fn predicate<F>(description: impl Into<String>, test: F) -> Pattern
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    from_fn(description, test)
}

#[cfg(test)]
#[path = "matchers_tests.rs"]
mod tests;
