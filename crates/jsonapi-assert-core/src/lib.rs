//! jsonapi-assert core - Payload schemas and assertions for JSON:API responses
//!
//! This crate lets a test declare, once, the expected shape of a resource's
//! attributes and then assert actual response JSON against it, collecting
//! every mismatch into a single report instead of stopping at the first.
//!
//! # Main Components
//!
//! - **Payload DSL**: `Payload`, `KeySpec` and the named `Registry`
//! - **Matching Engine**: presence, equality, type and unexpected-key checks
//! - **Orchestrator**: `Registry::assert_payload` and the `assert_payload!` macro
//! - **Sanitizer**: nested test input to JSON:API request documents
//! - **Loader**: payload definitions from YAML or JSON files
//!
//! # Example
//!
//! ```rust
//! use jsonapi_assert_core::{Error, JsonType, Registry};
//! use serde_json::json;
//!
//! let mut registry = Registry::new();
//! registry.register("post", |p| {
//!     p.key("title");
//!     p.key("views").of_type(JsonType::Integer);
//! });
//!
//! let record = json!({"title": "Hello", "views": 5});
//! let response = json!({"id": "1", "jsonapi_type": "posts", "title": "Hello", "views": "5"});
//!
//! match registry.assert_payload("post", &record, &response) {
//!     Err(Error::Assertion(failure)) => assert_eq!(failure.len(), 2),
//!     other => panic!("unexpected result: {:?}", other),
//! }
//! ```

pub mod assertion;
pub mod config;
pub mod error;
pub mod loader;
pub mod matchers;
pub mod payload;
pub mod record;
pub mod sanitizer;
pub mod string_helpers;

// Re-export main types for convenience
pub use assertion::{AssertOptions, PayloadAssertion, AGGREGATION_LABEL};
pub use config::PayloadConfig;
pub use error::{Error, Result};
pub use loader::{LoaderError, PayloadLoader};
pub use matchers::{AssertionFailure, Failure, FailureKind};
pub use payload::{
    resolve_member_name, JsonType, KeySpec, MemberNameStyle, Payload, Producer, Registry,
    TypeConstraint,
};
pub use record::{Record, Serialized};
pub use sanitizer::{sanitize, PayloadSanitizer, SanitizeError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
