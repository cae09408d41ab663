//! Declared expectations for a single payload key
//!
//! Copyright (c) 2025 jsonapi-assert contributors
//! Licensed under the MIT OR Apache-2.0 license

use super::types::{MemberNameStyle, TypeConstraint};
use crate::error::Result;
use crate::record::Record;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Computes a key's expected value from the record under test
pub type Producer = Arc<dyn Fn(&dyn Record) -> Result<Value> + Send + Sync>;

/// Expectations for one declared key
///
/// Created through [`Payload::key`](super::Payload::key), which hands back a
/// mutable reference so options chain in declaration order:
///
/// ```rust
/// use jsonapi_assert_core::{JsonType, MemberNameStyle, Payload};
///
/// let mut payload = Payload::new("post");
/// payload.key("views").of_type(JsonType::Integer);
/// payload.key("subtitle").allow_nil();
/// payload.key("last_name").member_name_style(MemberNameStyle::Hyphen);
/// ```
#[derive(Clone)]
pub struct KeySpec {
    name: String,
    allow_nil: bool,
    type_constraint: Option<TypeConstraint>,
    producer: Producer,
    member_name_style: Option<MemberNameStyle>,
}

impl KeySpec {
    /// New key whose producer reads the same-named attribute from the record
    pub fn new<N: Into<String>>(name: N) -> Self {
        let name = name.into();
        let producer = read_attribute_producer(name.clone());
        Self {
            name,
            allow_nil: false,
            type_constraint: None,
            producer,
            member_name_style: None,
        }
    }

    /// Declared (canonical) key name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Allow the key to be present with a null value
    pub fn allow_nil(&mut self) -> &mut Self {
        self.allow_nil = true;
        self
    }

    /// Set nullability explicitly
    pub fn set_allow_nil(&mut self, allow_nil: bool) -> &mut Self {
        self.allow_nil = allow_nil;
        self
    }

    /// Require the value to match a type, or any of several types
    pub fn of_type<T: Into<TypeConstraint>>(&mut self, constraint: T) -> &mut Self {
        self.type_constraint = Some(constraint.into());
        self
    }

    /// Override the payload-wide member-name style for this key only
    pub fn member_name_style(&mut self, style: MemberNameStyle) -> &mut Self {
        self.member_name_style = Some(style);
        self
    }

    /// Replace the producer with a custom expression
    pub fn produce<F>(&mut self, producer: F) -> &mut Self
    where
        F: Fn(&dyn Record) -> Result<Value> + Send + Sync + 'static,
    {
        self.producer = Arc::new(producer);
        self
    }

    /// Replace the producer with one returning any serializable value
    ///
    /// The value goes through `serde_json::to_value`, so it is compared in
    /// its wire form: a `chrono::DateTime` compares as its RFC 3339 string.
    pub fn produce_serialized<T, F>(&mut self, producer: F) -> &mut Self
    where
        T: Serialize,
        F: Fn(&dyn Record) -> Result<T> + Send + Sync + 'static,
    {
        self.producer = Arc::new(move |record: &dyn Record| {
            let value = producer(record)?;
            Ok(serde_json::to_value(value)?)
        });
        self
    }

    /// Read the expected value from a differently-named record attribute
    pub fn read_from<A: Into<String>>(&mut self, attribute: A) -> &mut Self {
        self.producer = read_attribute_producer(attribute.into());
        self
    }

    /// Whether a null value is acceptable
    pub fn allows_nil(&self) -> bool {
        self.allow_nil
    }

    /// Declared type constraint, if any
    pub fn type_constraint(&self) -> Option<&TypeConstraint> {
        self.type_constraint.as_ref()
    }

    /// Per-key member-name style, if any
    pub fn member_name_style_override(&self) -> Option<&MemberNameStyle> {
        self.member_name_style.as_ref()
    }

    /// Run the producer against a record
    pub fn expected_value(&self, record: &dyn Record) -> Result<Value> {
        (self.producer)(record)
    }
}

fn read_attribute_producer(attribute: String) -> Producer {
    Arc::new(move |record: &dyn Record| record.fetch(&attribute))
}

impl fmt::Debug for KeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeySpec")
            .field("name", &self.name)
            .field("allow_nil", &self.allow_nil)
            .field("type_constraint", &self.type_constraint)
            .field("member_name_style", &self.member_name_style)
            .finish_non_exhaustive()
    }
}
