// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::matchers::{any_number, any_string};
use proptest::prelude::*;
use serde_json::json;
use yare::parameterized;

#[parameterized(
    partial_subset = { json!({ "a": 1 }), false, true },
    strict_subset = { json!({ "a": 1 }), true, false },
    strict_equal = { json!({ "a": 1, "b": 2 }), true, true },
    partial_equal = { json!({ "a": 1, "b": 2 }), false, true },
    partial_wrong_value = { json!({ "a": 2 }), false, false },
    partial_missing_key = { json!({ "c": 3 }), false, false },
    strict_extra_key = { json!({ "a": 1, "b": 2, "c": 3 }), true, false },
    partial_empty = { json!({}), false, true },
    strict_empty = { json!({}), true, false },
)]
fn filter_against_a1_b2(filter: Value, strict: bool, expected: bool) {
    let input = json!({ "a": 1, "b": 2 });
    let filter = if strict {
        InputFilter::strict(filter)
    } else {
        InputFilter::partial(filter)
    };
    assert_eq!(filter.matches(&input), expected);
}

#[test]
fn no_filter_matches_anything() {
    assert!(matches(&json!({ "a": 1 }), None));
    assert!(matches(&Value::Null, None));
}

#[test]
fn partial_only_applies_at_top_level() {
    let input = json!({ "Attributes": { "a": 1, "b": 2 }, "Other": true });

    let nested_subset = InputFilter::partial(json!({ "Attributes": { "a": 1 } }));
    assert!(!nested_subset.matches(&input));

    let nested_equal = InputFilter::partial(json!({ "Attributes": { "a": 1, "b": 2 } }));
    assert!(nested_equal.matches(&input));
}

#[test]
fn arrays_compare_in_order() {
    let input = json!({ "Tags": ["x", "y"] });
    assert!(InputFilter::partial(json!({ "Tags": ["x", "y"] })).matches(&input));
    assert!(!InputFilter::partial(json!({ "Tags": ["y", "x"] })).matches(&input));
    assert!(!InputFilter::partial(json!({ "Tags": ["x"] })).matches(&input));
}

#[test]
fn integer_and_float_forms_are_equal() {
    let input = json!({ "Count": 1.0 });
    assert!(InputFilter::strict(json!({ "Count": 1 })).matches(&input));
    assert!(!InputFilter::strict(json!({ "Count": 2 })).matches(&input));
}

#[test]
fn embedded_matchers_are_honored_at_depth() {
    let pattern = Pattern::from(json!({ "Message": "hi" }))
        .with("MessageId", any_string())
        .with("Meta", Pattern::object([("Size", any_number())]));

    let input = json!({ "Message": "hi", "MessageId": "u1", "Meta": { "Size": 4 } });
    assert!(InputFilter::strict(pattern.clone()).matches(&input));

    let wrong_type = json!({ "Message": "hi", "MessageId": 7, "Meta": { "Size": 4 } });
    assert!(!InputFilter::strict(pattern.clone()).matches(&wrong_type));

    let missing = json!({ "Message": "hi", "Meta": { "Size": 4 } });
    assert!(!InputFilter::partial(pattern).matches(&missing));
}

#[test]
fn matcher_at_top_level() {
    let filter = InputFilter::partial(Pattern::matcher(AlwaysFalse));
    assert!(!filter.matches(&json!({})));
}

#[test]
fn with_replaces_non_object() {
    let pattern = Pattern::from(json!("scalar")).with("a", Pattern::from(json!(1)));
    assert!(pattern.equals(&json!({ "a": 1 })));
}

#[test]
fn debug_shows_matcher_description() {
    let pattern = Pattern::array([Pattern::from("x"), any_string()]);
    assert_eq!(format!("{:?}", pattern), "[\"x\", any_string()]");
}

struct AlwaysFalse;

impl ValueMatcher for AlwaysFalse {
    fn test(&self, _value: &Value) -> bool {
        false
    }

    fn describe(&self) -> String {
        "always_false()".to_string()
    }
}

fn flat_object() -> impl Strategy<Value = serde_json::Map<String, Value>> {
    prop::collection::btree_map("[a-e]", 0i64..5, 0..5).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(k, v)| (k, Value::from(v)))
            .collect()
    })
}

proptest! {
    #[test]
    fn every_subset_matches_partially(input in flat_object(), keep in prop::collection::vec(any::<bool>(), 5)) {
        let subset: serde_json::Map<String, Value> = input
            .iter()
            .zip(keep.iter().cycle())
            .filter(|(_, keep)| **keep)
            .map(|((k, v), _)| (k.clone(), v.clone()))
            .collect();
        let is_whole = subset.len() == input.len();
        let input = Value::Object(input);

        prop_assert!(InputFilter::partial(Value::Object(subset.clone())).matches(&input));
        prop_assert_eq!(InputFilter::strict(Value::Object(subset)).matches(&input), is_whole);
    }
}
