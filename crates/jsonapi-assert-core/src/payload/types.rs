//! Type tags, type constraints and member-name styles used by payload keys
//!
//! Copyright (c) 2025 jsonapi-assert contributors
//! Licensed under the MIT OR Apache-2.0 license

use crate::string_helpers;
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Runtime type tags for JSON values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    /// JSON null
    Null,
    /// `true` or `false`
    Boolean,
    /// Integral number
    Integer,
    /// Non-integral number
    Float,
    /// Any number, integral or not
    Number,
    /// JSON string
    String,
    /// JSON array
    Array,
    /// JSON object
    Object,
    /// String holding an RFC 3339 timestamp
    Timestamp,
}

impl JsonType {
    /// The runtime tag of a value
    ///
    /// Never returns `Number` or `Timestamp`; those only appear in constraints.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonType::Null,
            Value::Bool(_) => JsonType::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => JsonType::Integer,
            Value::Number(_) => JsonType::Float,
            Value::String(_) => JsonType::String,
            Value::Array(_) => JsonType::Array,
            Value::Object(_) => JsonType::Object,
        }
    }

    /// Whether `value` satisfies this tag
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            JsonType::Null => value.is_null(),
            JsonType::Boolean => value.is_boolean(),
            JsonType::Integer => value.is_i64() || value.is_u64(),
            JsonType::Float => value.is_f64(),
            JsonType::Number => value.is_number(),
            JsonType::String => value.is_string(),
            JsonType::Array => value.is_array(),
            JsonType::Object => value.is_object(),
            JsonType::Timestamp => value
                .as_str()
                .is_some_and(|s| DateTime::parse_from_rfc3339(s).is_ok()),
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonType::Null => write!(f, "Null"),
            JsonType::Boolean => write!(f, "Boolean"),
            JsonType::Integer => write!(f, "Integer"),
            JsonType::Float => write!(f, "Float"),
            JsonType::Number => write!(f, "Number"),
            JsonType::String => write!(f, "String"),
            JsonType::Array => write!(f, "Array"),
            JsonType::Object => write!(f, "Object"),
            JsonType::Timestamp => write!(f, "Timestamp"),
        }
    }
}

/// Ordered set of alternative type tags; a value passes if it matches any of them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeConstraint {
    alternatives: Vec<JsonType>,
}

impl TypeConstraint {
    /// Constraint with a single allowed type
    pub fn one(json_type: JsonType) -> Self {
        Self {
            alternatives: vec![json_type],
        }
    }

    /// Constraint passing for any of the given types
    pub fn any_of<I: IntoIterator<Item = JsonType>>(types: I) -> Self {
        let mut alternatives = Vec::new();
        for json_type in types {
            if !alternatives.contains(&json_type) {
                alternatives.push(json_type);
            }
        }
        Self { alternatives }
    }

    /// Allowed types in declaration order
    pub fn alternatives(&self) -> &[JsonType] {
        &self.alternatives
    }

    /// Logical OR over the alternatives
    pub fn matches(&self, value: &Value) -> bool {
        self.alternatives.iter().any(|t| t.matches(value))
    }
}

impl fmt::Display for TypeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [single] = self.alternatives.as_slice() {
            return write!(f, "{}", single);
        }
        let names: Vec<String> = self.alternatives.iter().map(|t| t.to_string()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

impl From<JsonType> for TypeConstraint {
    fn from(json_type: JsonType) -> Self {
        Self::one(json_type)
    }
}

impl<const N: usize> From<[JsonType; N]> for TypeConstraint {
    fn from(types: [JsonType; N]) -> Self {
        Self::any_of(types)
    }
}

impl From<Vec<JsonType>> for TypeConstraint {
    fn from(types: Vec<JsonType>) -> Self {
        Self::any_of(types)
    }
}

/// A custom member-name transform
pub type NameTransform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Casing applied when rendering a declared key to its wire-level member name
#[derive(Clone, Default)]
pub enum MemberNameStyle {
    /// Keep the declared snake_case name
    #[default]
    Underscore,
    /// Underscores become dashes: `first-name`
    Hyphen,
    /// Capitalized words joined by spaces: `First Name`
    Titleize,
    /// Caller-supplied transform
    Custom(NameTransform),
}

impl MemberNameStyle {
    /// Build a custom style from a closure
    pub fn custom<F>(transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        MemberNameStyle::Custom(Arc::new(transform))
    }

    /// Parse a style name as written in payload definition files
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "underscore" => Some(MemberNameStyle::Underscore),
            "hyphen" | "dash" | "dasherize" => Some(MemberNameStyle::Hyphen),
            "titleize" => Some(MemberNameStyle::Titleize),
            _ => None,
        }
    }

    /// Render a declared key name in this style
    pub fn apply(&self, name: &str) -> String {
        match self {
            MemberNameStyle::Underscore => name.to_string(),
            MemberNameStyle::Hyphen => string_helpers::dasherize(name),
            MemberNameStyle::Titleize => string_helpers::titleize(name),
            MemberNameStyle::Custom(transform) => transform(name),
        }
    }
}

impl fmt::Debug for MemberNameStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberNameStyle::Underscore => write!(f, "Underscore"),
            MemberNameStyle::Hyphen => write!(f, "Hyphen"),
            MemberNameStyle::Titleize => write!(f, "Titleize"),
            MemberNameStyle::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl PartialEq for MemberNameStyle {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MemberNameStyle::Underscore, MemberNameStyle::Underscore) => true,
            (MemberNameStyle::Hyphen, MemberNameStyle::Hyphen) => true,
            (MemberNameStyle::Titleize, MemberNameStyle::Titleize) => true,
            (MemberNameStyle::Custom(a), MemberNameStyle::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Resolve the wire-level member name for a declared key
///
/// Precedence: per-key override, then the payload-wide style, then the
/// caller's `dasherized` flag, then the declared name unchanged.
pub fn resolve_member_name(
    name: &str,
    key_style: Option<&MemberNameStyle>,
    payload_style: Option<&MemberNameStyle>,
    dasherized: bool,
) -> String {
    match key_style.or(payload_style) {
        Some(style) => style.apply(name),
        None if dasherized => MemberNameStyle::Hyphen.apply(name),
        None => name.to_string(),
    }
}
