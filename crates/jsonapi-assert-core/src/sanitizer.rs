//! Payload sanitizer: nested test input to a JSON:API request document
//!
//! Test authors describe a resource as one nested object:
//!
//! ```json
//! {
//!   "type": "posts",
//!   "title": "Hello",
//!   "relationships": {
//!     "author": { "id": "1", "type": "people", "name": "Jane" },
//!     "tags": [{ "id": "7", "type": "tags", "name": "rust" }]
//!   }
//! }
//! ```
//!
//! [`sanitize`] flattens that into `data` (with attributes and resource
//! identifier linkage) plus a deduplicated `included` array holding every
//! nested resource, recursively.
//!
//! Copyright (c) 2025 jsonapi-assert contributors
//! Licensed under the MIT OR Apache-2.0 license

use crate::payload::JsonType;
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Invalid sanitizer input
///
/// Every variant names the `$`-rooted path of the offending nested input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SanitizeError {
    #[error("jsonapi payloads must specify a \"type\" (at {path})")]
    MissingType { path: String },

    #[error("jsonapi payload \"type\" must be a string at {path}, got {actual}")]
    InvalidType { path: String, actual: String },

    #[error("jsonapi payload at {path} must be an object, got {actual}")]
    NotAnObject { path: String, actual: String },

    #[error("jsonapi payload relationships at {path} must be an object, got {actual}")]
    InvalidRelationships { path: String, actual: String },
}

/// Split form of one nested input resource
#[derive(Debug, Clone)]
struct Resource {
    id: Option<Value>,
    resource_type: String,
    attributes: Map<String, Value>,
    relationships: Map<String, Value>,
}

/// Sanitizes one resource and, recursively, its relationships
#[derive(Debug)]
pub struct PayloadSanitizer {
    path: String,
    resource: Resource,
    included: Vec<Value>,
}

impl PayloadSanitizer {
    /// Validate and split the input; fails before any output is built
    pub fn new(input: &Value) -> Result<Self, SanitizeError> {
        Self::at_path(input, "$".to_string())
    }

    fn at_path(input: &Value, path: String) -> Result<Self, SanitizeError> {
        let resource = split_resource(input, &path)?;
        Ok(Self {
            path,
            resource,
            included: Vec::new(),
        })
    }

    /// `{type, id}` pair referencing this resource; `id` omitted when absent
    pub fn resource_identifier(&self) -> Value {
        let mut identifier = Map::new();
        if let Some(id) = &self.resource.id {
            identifier.insert("id".to_string(), id.clone());
        }
        identifier.insert(
            "type".to_string(),
            Value::String(self.resource.resource_type.clone()),
        );
        Value::Object(identifier)
    }

    /// Build the `{data, included}` document
    pub fn sanitize(mut self) -> Result<Value, SanitizeError> {
        log::trace!(
            "Sanitizing '{}' resource at {}",
            self.resource.resource_type,
            self.path
        );

        let mut data = Map::new();
        if let Some(id) = &self.resource.id {
            data.insert("id".to_string(), id.clone());
        }
        data.insert(
            "type".to_string(),
            Value::String(self.resource.resource_type.clone()),
        );
        data.insert(
            "attributes".to_string(),
            Value::Object(self.resource.attributes.clone()),
        );

        let relationships = std::mem::take(&mut self.resource.relationships);
        if !relationships.is_empty() {
            let mut linkage = Map::new();
            for (name, related) in &relationships {
                let path = format!("{}.relationships.{}", self.path, name);
                let identifiers = self.process_relationship(related, &path)?;
                linkage.insert(name.clone(), json!({ "data": identifiers }));
            }
            data.insert("relationships".to_string(), Value::Object(linkage));
        }

        Ok(json!({
            "data": Value::Object(data),
            "included": Value::Array(self.included),
        }))
    }

    fn process_relationship(&mut self, related: &Value, path: &str) -> Result<Value, SanitizeError> {
        match related {
            Value::Array(items) => {
                let mut identifiers = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let path = format!("{}[{}]", path, index);
                    identifiers.push(self.process_related_resource(item, path)?);
                }
                Ok(Value::Array(identifiers))
            }
            Value::Null => Ok(Value::Null),
            item => self.process_related_resource(item, path.to_string()),
        }
    }

    fn process_related_resource(&mut self, item: &Value, path: String) -> Result<Value, SanitizeError> {
        let nested = Self::at_path(item, path)?;
        let identifier = nested.resource_identifier();

        let document = nested.sanitize()?;
        if let Value::Object(mut document) = document {
            if let Some(data) = document.remove("data") {
                self.add_include(data);
            }
            if let Some(Value::Array(included)) = document.remove("included") {
                for resource in included {
                    self.add_include(resource);
                }
            }
        }
        Ok(identifier)
    }

    fn add_include(&mut self, resource: Value) {
        if !self.included.contains(&resource) {
            self.included.push(resource);
        }
    }
}

fn split_resource(input: &Value, path: &str) -> Result<Resource, SanitizeError> {
    let object = input.as_object().ok_or_else(|| SanitizeError::NotAnObject {
        path: path.to_string(),
        actual: JsonType::of(input).to_string(),
    })?;

    let resource_type = match object.get("type") {
        None | Some(Value::Null) => {
            return Err(SanitizeError::MissingType {
                path: path.to_string(),
            })
        }
        Some(Value::String(resource_type)) => resource_type.clone(),
        Some(other) => {
            return Err(SanitizeError::InvalidType {
                path: path.to_string(),
                actual: JsonType::of(other).to_string(),
            })
        }
    };

    let relationships = match object.get("relationships") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(relationships)) => relationships.clone(),
        Some(other) => {
            return Err(SanitizeError::InvalidRelationships {
                path: path.to_string(),
                actual: JsonType::of(other).to_string(),
            })
        }
    };

    let id = object.get("id").filter(|id| !id.is_null()).cloned();
    let attributes = object
        .iter()
        .filter(|(key, _)| !matches!(key.as_str(), "id" | "type" | "relationships"))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(Resource {
        id,
        resource_type,
        attributes,
        relationships,
    })
}

/// Turn a nested input resource into a JSON:API `{data, included}` document
pub fn sanitize(input: &Value) -> Result<Value, SanitizeError> {
    PayloadSanitizer::new(input)?.sanitize()
}
