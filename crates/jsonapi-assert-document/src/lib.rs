//! jsonapi-assert document - Navigation helpers for JSON:API responses in tests
//!
//! Turns a response body into a [`Document`] and offers the lookups a test
//! needs before asserting: flattened items, ids, included resources by type,
//! relationship sideloads and links, and the `errors` array. The
//! [`client`] module defines the HTTP client contract a suite implements to
//! send JSON:API requests.
//!
//! # Example
//!
//! ```rust
//! use jsonapi_assert_core::Registry;
//! use jsonapi_assert_document::Document;
//! use serde_json::json;
//!
//! let body = r#"{
//!     "data": {"id": "1", "type": "posts", "attributes": {"title": "Hello"}}
//! }"#;
//! let document = Document::from_body(body).unwrap();
//!
//! let mut registry = Registry::new();
//! registry.register("post", |p| {
//!     p.key("title");
//! });
//! registry
//!     .assert_payload("post", &json!({"title": "Hello"}), &document.item().unwrap())
//!     .unwrap();
//! ```

pub mod client;
pub mod document;
pub mod error;
pub mod errors_proxy;
pub mod node;

pub use client::{
    jsonapi_headers, jsonapi_payload, ApiClient, JsonApiClient, Method, Response,
    CONTENT_TYPE_HEADER, JSONAPI_MEDIA_TYPE,
};
pub use document::{json_item, related_link, Data, Document, RELATIVE_LINK_BASE};
pub use error::{Error, Result};
pub use errors_proxy::{ApiError, ErrorsProxy};
pub use node::{Node, Sideload};
