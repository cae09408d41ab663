//! Resource nodes: one flattened JSON:API resource with relationship lookups

use crate::document::Document;
use crate::error::{Error, Result};
use jsonapi_assert_core::{JsonType, Record};
use serde_json::{Map, Value};

/// A resource flattened to `id`, `jsonapi_type` and its attributes
///
/// Nodes borrow the document they came from so relationships can be
/// resolved against its `included` array.
#[derive(Debug, Clone)]
pub struct Node<'a> {
    document: &'a Document,
    item: Map<String, Value>,
    relationships: Map<String, Value>,
}

/// Resolved relationship linkage
#[derive(Debug, Clone)]
pub enum Sideload<'a> {
    /// To-one relationship
    One(Node<'a>),
    /// To-many relationship, in linkage order
    Many(Vec<Node<'a>>),
}

impl<'a> Sideload<'a> {
    /// The single node of a to-one relationship
    pub fn one(self) -> Option<Node<'a>> {
        match self {
            Sideload::One(node) => Some(node),
            Sideload::Many(_) => None,
        }
    }

    /// Nodes of the relationship; a to-one relationship yields one node
    pub fn into_nodes(self) -> Vec<Node<'a>> {
        match self {
            Sideload::One(node) => vec![node],
            Sideload::Many(nodes) => nodes,
        }
    }
}

impl<'a> Node<'a> {
    pub(crate) fn new(document: &'a Document, resource: &Value) -> Result<Self> {
        let item = flatten_resource(resource)?;
        let relationships = resource
            .get("relationships")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        Ok(Self {
            document,
            item,
            relationships,
        })
    }

    /// The id as written, with numeric ids in their string form
    pub fn raw_id(&self) -> Option<String> {
        match self.item.get("id") {
            Some(Value::String(id)) => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        }
    }

    /// The id parsed as an integer
    pub fn id(&self) -> Result<i64> {
        let raw = self.raw_id().ok_or_else(|| Error::AttributeNotFound {
            name: "id".to_string(),
        })?;
        raw.parse().map_err(|_| Error::InvalidId { id: raw })
    }

    /// Resource type
    pub fn jsonapi_type(&self) -> Option<&str> {
        self.item.get("jsonapi_type").and_then(Value::as_str)
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.item.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.item.get(key)
    }

    /// Attribute lookup that fails on a miss
    pub fn attribute(&self, key: &str) -> Result<&Value> {
        self.get(key).ok_or_else(|| Error::AttributeNotFound {
            name: key.to_string(),
        })
    }

    /// Flattened attributes, including `id` and `jsonapi_type`
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.item
    }

    /// Flattened attributes as a JSON value, ready for payload assertions
    pub fn item(&self) -> Value {
        Value::Object(self.item.clone())
    }

    pub fn relationships(&self) -> &Map<String, Value> {
        &self.relationships
    }

    /// A named link of a relationship; `Ok(None)` when the links block lacks it
    pub fn link(&self, relationship: &str, name: &str) -> Result<Option<&Value>> {
        let entry = self.relationship(relationship)?;
        let links = entry.get("links").ok_or_else(|| Error::LinksNotFound {
            name: relationship.to_string(),
        })?;
        Ok(links.get(name))
    }

    /// Resolve a relationship's linkage against the document's `included` array
    ///
    /// Returns `Ok(None)` for null or absent linkage.
    pub fn sideload(&self, relationship: &str) -> Result<Option<Sideload<'a>>> {
        let entry = self.relationship(relationship)?;
        match entry.get("data") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(identifiers)) => {
                let nodes = identifiers
                    .iter()
                    .map(|identifier| self.include_for(identifier))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Some(Sideload::Many(nodes)))
            }
            Some(identifier) => Ok(Some(Sideload::One(self.include_for(identifier)?))),
        }
    }

    fn relationship(&self, name: &str) -> Result<&Value> {
        self.relationships
            .get(name)
            .ok_or_else(|| Error::SideloadNotFound {
                name: name.to_string(),
            })
    }

    fn include_for(&self, identifier: &Value) -> Result<Node<'a>> {
        let resource_type = identifier.get("type").unwrap_or(&Value::Null);
        let id = identifier.get("id").unwrap_or(&Value::Null);
        log::trace!("Resolving sideload {}/{}", resource_type, id);

        let included = self
            .document
            .json()
            .get("included")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::no_sideloads(self.document.json()))?;

        let resource = included
            .iter()
            .find(|resource| {
                resource.get("type") == Some(resource_type) && resource.get("id") == Some(id)
            })
            .ok_or_else(|| Error::IncludedNotFound {
                resource_type: display(resource_type),
                id: display(id),
            })?;

        Node::new(self.document, resource)
    }
}

impl Record for Node<'_> {
    fn read_attribute(&self, name: &str) -> Option<Value> {
        self.item.get(name).cloned()
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Merge `id`, `jsonapi_type` and the attributes of one resource object
///
/// `id` and `jsonapi_type` are always present, null when the resource lacks them.
pub(crate) fn flatten_resource(resource: &Value) -> Result<Map<String, Value>> {
    let object = resource.as_object().ok_or_else(|| Error::NotAResource {
        actual: JsonType::of(resource).to_string(),
    })?;

    let mut item = Map::new();
    item.insert(
        "id".to_string(),
        object.get("id").cloned().unwrap_or(Value::Null),
    );
    item.insert(
        "jsonapi_type".to_string(),
        object.get("type").cloned().unwrap_or(Value::Null),
    );
    if let Some(Value::Object(attributes)) = object.get("attributes") {
        for (key, value) in attributes {
            item.insert(key.clone(), value.clone());
        }
    }
    Ok(item)
}
