//! Error types for response navigation and request helpers

use crate::client::Method;
use jsonapi_assert_core::SanitizeError;
use serde_json::Value;
use thiserror::Error;

/// Navigation and request failures
///
/// Each variant embeds the offending name, index or payload so a failure
/// can be diagnosed from its message alone.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot parse response - missing response body!")]
    NoResponse,

    #[error("Payload did not contain 'data'! Payload was:\n\n{payload}")]
    NoData { payload: String },

    #[error("Tried to find sideload, but the payload did not contain 'included'! Payload was:\n\n{payload}")]
    NoSideloads { payload: String },

    #[error("Relationship with name '{name}' has no links!")]
    LinksNotFound { name: String },

    #[error("Relationship with name '{name}' not found!")]
    SideloadNotFound { name: String },

    /// A relationship has links, but not the one asked for
    #[error("Relationship with name '{relationship}' has no '{link}' link!")]
    LinkNotFound { relationship: String, link: String },

    #[error("Index {index} out of bounds for {len} {what}")]
    IndexOutOfBounds {
        what: String,
        index: usize,
        len: usize,
    },

    #[error("Resource has no attribute '{name}'")]
    AttributeNotFound { name: String },

    #[error("Resource id '{id}' is not an integer")]
    InvalidId { id: String },

    /// Relationship linkage points at a resource missing from `included`
    #[error("No included resource with type '{resource_type}' and id '{id}'")]
    IncludedNotFound { resource_type: String, id: String },

    #[error("Expected a JSON:API resource object, got {actual}")]
    NotAResource { actual: String },

    #[error("Invalid link '{link}': {source}")]
    InvalidUrl {
        link: String,
        #[source]
        source: url::ParseError,
    },

    /// Response body is not valid JSON
    #[error("Cannot parse response body as JSON: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },

    /// The collaborator HTTP client failed
    #[error("{method} {url} failed: {source}")]
    Client {
        method: Method,
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Sanitize(#[from] SanitizeError),
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// `NoData` carrying the pretty-printed payload
    pub fn no_data(payload: &Value) -> Self {
        Error::NoData {
            payload: pretty(payload),
        }
    }

    /// `NoSideloads` carrying the pretty-printed payload
    pub fn no_sideloads(payload: &Value) -> Self {
        Error::NoSideloads {
            payload: pretty(payload),
        }
    }

    pub fn index_out_of_bounds<W: Into<String>>(what: W, index: usize, len: usize) -> Self {
        Error::IndexOutOfBounds {
            what: what.into(),
            index,
            len,
        }
    }
}

fn pretty(payload: &Value) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}
