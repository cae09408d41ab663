//! Parsed response documents and item helpers
//!
//! An *item* is a resource flattened into one JSON object: its `id`, its
//! `type` under `jsonapi_type`, and its attributes. Items are what payload
//! assertions compare against.

use crate::error::{Error, Result};
use crate::errors_proxy::ErrorsProxy;
use crate::node::{flatten_resource, Node};
use jsonapi_assert_core::JsonType;
use serde_json::Value;
use url::Url;

/// Primary data of a document
#[derive(Debug, Clone)]
pub enum Data<'a> {
    /// Single resource
    One(Node<'a>),
    /// Resource collection, in document order
    Many(Vec<Node<'a>>),
}

impl<'a> Data<'a> {
    /// The node of a single-resource document
    pub fn one(self) -> Option<Node<'a>> {
        match self {
            Data::One(node) => Some(node),
            Data::Many(_) => None,
        }
    }

    /// Every node; a single-resource document yields one node
    pub fn into_nodes(self) -> Vec<Node<'a>> {
        match self {
            Data::One(node) => vec![node],
            Data::Many(nodes) => nodes,
        }
    }
}

/// A parsed JSON:API response body
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    json: Value,
}

impl Document {
    /// Parse a response body
    pub fn from_body(body: &str) -> Result<Self> {
        if body.trim().is_empty() {
            return Err(Error::NoResponse);
        }
        Ok(Self::from_value(serde_json::from_str(body)?))
    }

    /// Wrap an already parsed document
    pub fn from_value(json: Value) -> Self {
        Self { json }
    }

    /// The whole parsed document
    pub fn json(&self) -> &Value {
        &self.json
    }

    /// Primary data as nodes; a null or missing `data` is `NoData`
    pub fn data(&self) -> Result<Data<'_>> {
        match self.json.get("data") {
            Some(Value::Array(resources)) => Ok(Data::Many(
                resources
                    .iter()
                    .map(|resource| Node::new(self, resource))
                    .collect::<Result<_>>()?,
            )),
            Some(resource @ Value::Object(_)) => Ok(Data::One(Node::new(self, resource)?)),
            _ => Err(Error::no_data(&self.json)),
        }
    }

    /// Every included resource as a node
    pub fn included(&self) -> Result<Vec<Node<'_>>> {
        self.included_resources()?
            .iter()
            .map(|resource| Node::new(self, resource))
            .collect()
    }

    /// The primary resource of a single-resource document as an item
    pub fn item(&self) -> Result<Value> {
        match self.json.get("data") {
            Some(resource @ Value::Object(_)) => json_item(resource),
            Some(Value::Null) | None => Err(Error::no_data(&self.json)),
            Some(other) => Err(Error::NotAResource {
                actual: JsonType::of(other).to_string(),
            }),
        }
    }

    /// Every primary resource as an item
    pub fn items(&self) -> Result<Vec<Value>> {
        self.data_resources()?.into_iter().map(json_item).collect()
    }

    /// Primary resources at `indices` as items, in the order given
    pub fn items_at(&self, indices: &[usize]) -> Result<Vec<Value>> {
        let resources = self.data_resources()?;
        pick(&resources, indices, "data resources")?
            .into_iter()
            .map(json_item)
            .collect()
    }

    /// The primary resource at `index` as an item
    pub fn item_at(&self, index: usize) -> Result<Value> {
        let resources = self.data_resources()?;
        let resource = resources
            .get(index)
            .ok_or_else(|| Error::index_out_of_bounds("data resources", index, resources.len()))?;
        json_item(resource)
    }

    /// Raw ids of the primary resources, numeric ids in string form
    pub fn ids(&self) -> Result<Vec<String>> {
        self.data_resources()?
            .into_iter()
            .map(|resource| match resource.get("id") {
                Some(Value::String(id)) => Ok(id.clone()),
                Some(Value::Number(id)) => Ok(id.to_string()),
                _ => Err(Error::AttributeNotFound {
                    name: "id".to_string(),
                }),
            })
            .collect()
    }

    /// Ids of the primary resources parsed as integers
    pub fn integer_ids(&self) -> Result<Vec<i64>> {
        self.ids()?
            .into_iter()
            .map(|id| id.parse::<i64>().map_err(|_| Error::InvalidId { id }))
            .collect()
    }

    /// Distinct types in `included`, in first-seen order; empty without `included`
    pub fn included_types(&self) -> Vec<String> {
        let mut types: Vec<String> = Vec::new();
        let included = self.json.get("included").and_then(Value::as_array);
        for resource in included.into_iter().flatten() {
            if let Some(resource_type) = resource.get("type").and_then(Value::as_str) {
                if !types.iter().any(|t| t == resource_type) {
                    types.push(resource_type.to_string());
                }
            }
        }
        types
    }

    /// Included resources of one type as items
    pub fn includes(&self, resource_type: &str) -> Result<Vec<Value>> {
        self.included_of_type(resource_type)
            .into_iter()
            .map(json_item)
            .collect()
    }

    /// Included resources of one type at `indices` as items
    pub fn includes_at(&self, resource_type: &str, indices: &[usize]) -> Result<Vec<Value>> {
        let resources = self.included_of_type(resource_type);
        let what = format!("'{}' includes", resource_type);
        pick(&resources, indices, &what)?
            .into_iter()
            .map(json_item)
            .collect()
    }

    /// The included resource of one type at `index` as an item
    pub fn include(&self, resource_type: &str, index: usize) -> Result<Value> {
        let mut items = self.includes_at(resource_type, &[index])?;
        Ok(items.remove(0))
    }

    /// Errors listed in the document; empty when there are none
    pub fn errors(&self) -> ErrorsProxy {
        ErrorsProxy::new(
            self.json
                .get("errors")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
        )
    }

    fn data_resources(&self) -> Result<Vec<&Value>> {
        match self.json.get("data") {
            Some(Value::Array(resources)) => Ok(resources.iter().collect()),
            Some(resource @ Value::Object(_)) => Ok(vec![resource]),
            _ => Err(Error::no_data(&self.json)),
        }
    }

    fn included_resources(&self) -> Result<&Vec<Value>> {
        self.json
            .get("included")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::no_sideloads(&self.json))
    }

    fn included_of_type(&self, resource_type: &str) -> Vec<&Value> {
        self.json
            .get("included")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter(|resource| resource.get("type").and_then(Value::as_str) == Some(resource_type))
            .collect()
    }
}

fn pick<'v>(resources: &[&'v Value], indices: &[usize], what: &str) -> Result<Vec<&'v Value>> {
    if indices.is_empty() {
        return Ok(resources.to_vec());
    }
    indices
        .iter()
        .map(|&index| {
            resources
                .get(index)
                .copied()
                .ok_or_else(|| Error::index_out_of_bounds(what, index, resources.len()))
        })
        .collect()
}

/// Flatten a resource, or a document's single primary resource, into an item
///
/// ```rust
/// use jsonapi_assert_document::json_item;
/// use serde_json::json;
///
/// let item = json_item(&json!({
///     "data": {"id": "1", "type": "posts", "attributes": {"title": "Hello"}}
/// })).unwrap();
/// assert_eq!(item, json!({"id": "1", "jsonapi_type": "posts", "title": "Hello"}));
/// ```
pub fn json_item(value: &Value) -> Result<Value> {
    let resource = value.get("data").unwrap_or(value);
    Ok(Value::Object(flatten_resource(resource)?))
}

/// Base that relative links are resolved against
pub const RELATIVE_LINK_BASE: &str = "http://localhost";

/// The decoded `related` link of a relationship on a raw resource object
///
/// Relative links such as `/comments?page=2` resolve against
/// [`RELATIVE_LINK_BASE`], so their path and query can still be inspected.
pub fn related_link(resource: &Value, relationship: &str) -> Result<Url> {
    let entry = resource
        .get("relationships")
        .and_then(|relationships| relationships.get(relationship))
        .ok_or_else(|| Error::SideloadNotFound {
            name: relationship.to_string(),
        })?;
    let links = entry.get("links").ok_or_else(|| Error::LinksNotFound {
        name: relationship.to_string(),
    })?;

    let related = links.get("related");
    let href = related
        .and_then(|link| link.get("href").or(Some(link)))
        .and_then(Value::as_str)
        .ok_or_else(|| Error::LinkNotFound {
            relationship: relationship.to_string(),
            link: "related".to_string(),
        })?;

    let parsed = match Url::parse(href) {
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(RELATIVE_LINK_BASE).and_then(|base| base.join(href))
        }
        parsed => parsed,
    };
    parsed.map_err(|source| Error::InvalidUrl {
        link: href.to_string(),
        source,
    })
}
