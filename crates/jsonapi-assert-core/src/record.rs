//! Source records that payload producers read expected values from
//!
//! A payload key's producer receives the record under test as `&dyn Record`
//! and asks it for named attributes. Anything with named getters can be a
//! record: JSON objects and string-keyed maps work out of the box, and any
//! `Serialize` type can be wrapped in [`Serialized`].
//!
//! Copyright (c) 2025 jsonapi-assert contributors
//! Licensed under the MIT OR Apache-2.0 license

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Something exposing named attributes
pub trait Record {
    /// Read a named attribute, `None` when the record has no such attribute
    ///
    /// A present attribute holding JSON null returns `Some(Value::Null)`.
    fn read_attribute(&self, name: &str) -> Option<Value>;

    /// Read a named attribute, failing when it does not exist
    fn fetch(&self, name: &str) -> Result<Value> {
        self.read_attribute(name)
            .ok_or_else(|| Error::AttributeNotFound {
                attribute: name.to_string(),
            })
    }
}

impl Record for Value {
    fn read_attribute(&self, name: &str) -> Option<Value> {
        self.as_object().and_then(|object| object.get(name)).cloned()
    }
}

impl Record for Map<String, Value> {
    fn read_attribute(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl<V: Serialize> Record for HashMap<String, V> {
    fn read_attribute(&self, name: &str) -> Option<Value> {
        self.get(name).and_then(|value| serde_json::to_value(value).ok())
    }

    fn fetch(&self, name: &str) -> Result<Value> {
        fetch_serialized(self.get(name), name)
    }
}

impl<V: Serialize> Record for BTreeMap<String, V> {
    fn read_attribute(&self, name: &str) -> Option<Value> {
        self.get(name).and_then(|value| serde_json::to_value(value).ok())
    }

    fn fetch(&self, name: &str) -> Result<Value> {
        fetch_serialized(self.get(name), name)
    }
}

impl<T: Record + ?Sized> Record for &T {
    fn read_attribute(&self, name: &str) -> Option<Value> {
        (**self).read_attribute(name)
    }
}

impl<T: Record + ?Sized> Record for Box<T> {
    fn read_attribute(&self, name: &str) -> Option<Value> {
        (**self).read_attribute(name)
    }
}

/// Serialize a map entry, keeping the serializer's error when it fails
fn fetch_serialized<V: Serialize>(value: Option<&V>, name: &str) -> Result<Value> {
    let value = value.ok_or_else(|| Error::AttributeNotFound {
        attribute: name.to_string(),
    })?;
    Ok(serde_json::to_value(value)?)
}

/// A `Serialize` value exposed as a record through its serialized fields
///
/// Fields are read after serialization, so timestamps, decimals and other
/// rich types are seen in the same form the server writes to the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Serialized {
    fields: Map<String, Value>,
}

impl Serialized {
    /// Serialize `value`, which must serialize to a JSON object
    pub fn new<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        match serde_json::to_value(value)? {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(Error::NotAnObject {
                actual: crate::payload::JsonType::of(&other).to_string(),
            }),
        }
    }

    /// Serialized fields
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl Record for Serialized {
    fn read_attribute(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }
}
