//! Payload schema DSL and registry
//!
//! A payload declares, once, which attribute keys a resource must carry,
//! how to compute each key's expected value from a record, which type each
//! value must have, and which keys must be absent.
//!
//! The module is organized into:
//! - `types`: type tags, type constraints and member-name styles
//! - `key_spec`: per-key expectations and producers
//! - `schema`: the `Payload` schema itself
//! - `registry`: named storage and the assertion entry points
//!
//! Copyright (c) 2025 jsonapi-assert contributors
//! Licensed under the MIT OR Apache-2.0 license

pub mod key_spec;
pub mod registry;
pub mod schema;
pub mod types;

pub use key_spec::{KeySpec, Producer};
pub use registry::Registry;
pub use schema::Payload;
pub use types::{resolve_member_name, JsonType, MemberNameStyle, NameTransform, TypeConstraint};
