//! Access to a document's `errors` array

use serde_json::Value;
use std::collections::BTreeMap;

/// One entry of a JSON:API `errors` array
///
/// `attribute`, `code` and `message` come from the entry's `meta` block;
/// `title`, `detail` and `status` are top-level members.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    json: Value,
}

impl ApiError {
    pub fn new(json: Value) -> Self {
        Self { json }
    }

    /// The raw error object
    pub fn json(&self) -> &Value {
        &self.json
    }

    pub fn attribute(&self) -> Option<&str> {
        self.meta("attribute")
    }

    pub fn code(&self) -> Option<&str> {
        self.meta("code")
    }

    pub fn message(&self) -> Option<&str> {
        self.meta("message")
    }

    pub fn title(&self) -> Option<&str> {
        self.json.get("title").and_then(Value::as_str)
    }

    pub fn detail(&self) -> Option<&str> {
        self.json.get("detail").and_then(Value::as_str)
    }

    pub fn status(&self) -> Option<&str> {
        self.json.get("status").and_then(Value::as_str)
    }

    fn meta(&self, key: &str) -> Option<&str> {
        self.json
            .get("meta")
            .and_then(|meta| meta.get(key))
            .and_then(Value::as_str)
    }
}

/// Ordered collection of [`ApiError`]s
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorsProxy {
    errors: Vec<ApiError>,
}

impl ErrorsProxy {
    pub fn new(errors: Vec<Value>) -> Self {
        Self {
            errors: errors.into_iter().map(ApiError::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ApiError> {
        self.errors.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ApiError> {
        self.errors.iter()
    }

    /// First error about `attribute`
    pub fn find(&self, attribute: &str) -> Option<&ApiError> {
        self.errors.iter().find(|e| e.attribute() == Some(attribute))
    }

    /// Attribute to message; errors without an attribute are skipped
    ///
    /// When several errors name the same attribute the last one wins.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .filter_map(|e| {
                let attribute = e.attribute()?;
                Some((attribute.to_string(), e.message().unwrap_or_default().to_string()))
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a ErrorsProxy {
    type Item = &'a ApiError;
    type IntoIter = std::slice::Iter<'a, ApiError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
