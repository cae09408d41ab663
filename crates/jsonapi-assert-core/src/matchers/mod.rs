//! Matching engine: the individual payload checks
//!
//! Each predicate is pure and returns `Ok(())` on a pass or a [`Failure`]
//! carrying its diagnostic. None of them report anything on their own; the
//! assertion orchestrator decides how failures are aggregated.
//!
//! Copyright (c) 2025 jsonapi-assert contributors
//! Licensed under the MIT OR Apache-2.0 license

pub mod failure;

pub use failure::{AssertionFailure, Failure, FailureAggregator, FailureKind};

use crate::payload::{JsonType, TypeConstraint};
use serde_json::{Map, Number, Value};
use std::collections::HashSet;

/// Members added by the navigation layer that are never reported as unexpected
pub const IGNORED_KEYS: [&str; 2] = ["id", "jsonapi_type"];

/// Outcome of a single check
pub type MatchResult = Result<(), Failure>;

/// How a member appears in a JSON object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPresence {
    /// Present with a non-null value
    Present,
    /// Present with a null value
    Nil,
    /// Not present at all
    Missing,
}

/// Classify how `member_name` appears in `json`
pub fn key_presence(json: &Map<String, Value>, member_name: &str) -> KeyPresence {
    match json.get(member_name) {
        Some(Value::Null) => KeyPresence::Nil,
        Some(_) => KeyPresence::Present,
        None => KeyPresence::Missing,
    }
}

/// The key must exist; unless `allow_nil`, it must also be non-null
pub fn has_payload_key(json: &Map<String, Value>, member_name: &str, allow_nil: bool) -> MatchResult {
    match (key_presence(json, member_name), allow_nil) {
        (KeyPresence::Present, _) | (KeyPresence::Nil, true) => Ok(()),
        (KeyPresence::Nil, false) => Err(Failure::new(
            FailureKind::NilValue,
            member_name,
            format!(
                "Expected JSON payload to have key '{}' but was nil. \
                 Use 'key(\"foo\").allow_nil()' to allow nils",
                member_name
            ),
        )
        .with_actual(Value::Null)),
        (KeyPresence::Missing, _) => Err(Failure::new(
            FailureKind::MissingKey,
            member_name,
            format!(
                "Expected JSON payload to have key '{}' but was not present",
                member_name
            ),
        )),
    }
}

/// Negated presence: the key must be absent or null
pub fn lacks_payload_key(json: &Map<String, Value>, member_name: &str) -> MatchResult {
    match json.get(member_name) {
        Some(value) if !value.is_null() => Err(Failure::new(
            FailureKind::ForbiddenKey,
            member_name,
            format!(
                "Expected JSON payload to NOT have key '{}' but was present",
                member_name
            ),
        )
        .with_actual(value.clone())),
        _ => Ok(()),
    }
}

/// The actual value must equal the expected value in its serialized form
pub fn match_payload(member_name: &str, actual: &Value, expected: &Value) -> MatchResult {
    if values_match(actual, expected) {
        return Ok(());
    }

    Err(Failure::new(
        FailureKind::ValueMismatch,
        member_name,
        format!(
            "Expected JSON payload to have key '{}' == {} but was {}",
            member_name, expected, actual
        ),
    )
    .with_expected(expected.clone())
    .with_actual(actual.clone()))
}

/// The actual value must satisfy at least one alternative of the constraint
pub fn match_type(member_name: &str, actual: &Value, constraint: &TypeConstraint) -> MatchResult {
    if constraint.matches(actual) {
        return Ok(());
    }

    Err(Failure::new(
        FailureKind::TypeMismatch,
        member_name,
        format!(
            "Expected JSON payload key '{}' to have type {} but was {}",
            member_name,
            constraint,
            JsonType::of(actual)
        ),
    )
    .with_actual(actual.clone()))
}

/// Failure for a member that no declared key accounts for
pub fn unexpected_key(member_name: &str, actual: Option<&Value>) -> Failure {
    let failure = Failure::new(
        FailureKind::UnexpectedKey,
        member_name,
        format!("JSON payload contained unexpected key '{}'", member_name),
    );
    match actual {
        Some(value) => failure.with_actual(value.clone()),
        None => failure,
    }
}

/// Members of `json` not in `declared` and not in [`IGNORED_KEYS`], in document order
pub fn unexpected_keys<'a>(json: &'a Map<String, Value>, declared: &HashSet<String>) -> Vec<&'a str> {
    json.keys()
        .map(String::as_str)
        .filter(|key| !declared.contains(*key))
        .filter(|key| !IGNORED_KEYS.contains(key))
        .collect()
}

/// Deep equality with numeric comparison by value
///
/// `1` and `1.0` are equal here even though `serde_json` stores them as
/// different number representations. An integer equals a float only when
/// the float is integral and holds exactly that integer.
pub fn values_match(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(e)) => numbers_match(a, e),
        (Value::Array(a), Value::Array(e)) => {
            a.len() == e.len() && a.iter().zip(e.iter()).all(|(a, e)| values_match(a, e))
        }
        (Value::Object(a), Value::Object(e)) => {
            a.len() == e.len()
                && e.iter()
                    .all(|(key, e)| a.get(key).is_some_and(|a| values_match(a, e)))
        }
        (a, e) => a == e,
    }
}

fn numbers_match(actual: &Number, expected: &Number) -> bool {
    match (integer_value(actual), integer_value(expected)) {
        (Some(a), Some(e)) => a == e,
        (Some(i), None) => expected.as_f64().is_some_and(|f| float_equals_integer(f, i)),
        (None, Some(i)) => actual.as_f64().is_some_and(|f| float_equals_integer(f, i)),
        (None, None) => actual.as_f64() == expected.as_f64(),
    }
}

fn integer_value(number: &Number) -> Option<i128> {
    number
        .as_i64()
        .map(i128::from)
        .or_else(|| number.as_u64().map(i128::from))
}

fn float_equals_integer(float: f64, integer: i128) -> bool {
    // Integral floats below 2^127 convert to i128 without loss
    float.is_finite()
        && float.fract() == 0.0
        && float.abs() < 2f64.powi(127)
        && float as i128 == integer
}
