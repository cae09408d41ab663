//! Payload schema: the declared shape of one resource's attributes
//!
//! Copyright (c) 2025 jsonapi-assert contributors
//! Licensed under the MIT OR Apache-2.0 license

use super::key_spec::KeySpec;
use super::types::{resolve_member_name, JsonType, MemberNameStyle};
use crate::string_helpers;
use std::collections::HashSet;

/// Declared expectations for a resource's attributes
///
/// Keys keep their declaration order, which is also the order failures are
/// reported in. A name is either an expected key or a forbidden key, never
/// both: the most recent declaration wins.
#[derive(Debug, Clone)]
pub struct Payload {
    name: String,
    resource_type: Option<String>,
    keys: Vec<KeySpec>,
    no_keys: Vec<String>,
    member_name_style: Option<MemberNameStyle>,
}

impl Payload {
    /// Create an empty payload schema
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            resource_type: None,
            keys: Vec::new(),
            no_keys: Vec::new(),
            member_name_style: None,
        }
    }

    /// Registry name of this payload
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declare (or redeclare) an expected key
    ///
    /// Redeclaring replaces the previous options but keeps the key's
    /// position. Any `no_key` declaration for the same name is dropped.
    pub fn key<N: Into<String>>(&mut self, name: N) -> &mut KeySpec {
        let name = name.into();
        self.no_keys.retain(|k| *k != name);

        match self.keys.iter().position(|k| k.name() == name) {
            Some(index) => {
                self.keys[index] = KeySpec::new(name);
                &mut self.keys[index]
            }
            None => {
                self.keys.push(KeySpec::new(name));
                let last = self.keys.len() - 1;
                &mut self.keys[last]
            }
        }
    }

    /// Declare that a key must not appear with a non-null value
    pub fn no_key<N: Into<String>>(&mut self, name: N) -> &mut Self {
        let name = name.into();
        self.keys.retain(|k| k.name() != name);
        if !self.no_keys.contains(&name) {
            self.no_keys.push(name);
        }
        self
    }

    /// Declare `created_at` and `updated_at` as string-typed keys
    pub fn timestamps(&mut self) -> &mut Self {
        self.key("created_at").of_type(JsonType::String);
        self.key("updated_at").of_type(JsonType::String);
        self
    }

    /// Set the payload-wide member-name style
    pub fn member_name_style(&mut self, style: MemberNameStyle) -> &mut Self {
        self.member_name_style = Some(style);
        self
    }

    /// Payload-wide member-name style, if one was declared
    pub fn default_member_name_style(&self) -> Option<&MemberNameStyle> {
        self.member_name_style.as_ref()
    }

    /// Override the JSON:API resource type
    pub fn resource_type<T: Into<String>>(&mut self, resource_type: T) -> &mut Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    /// Resource type: the explicit override, else the pluralized payload name
    pub fn type_for(&self) -> String {
        match &self.resource_type {
            Some(resource_type) => resource_type.clone(),
            None => string_helpers::pluralize(&self.name),
        }
    }

    /// Independent copy for per-assertion customization
    ///
    /// Key and no-key collections are copied; producers are shared.
    pub fn fork(&self) -> Payload {
        log::trace!("Forking payload '{}'", self.name);
        self.clone()
    }

    /// Declared keys in declaration order
    pub fn keys(&self) -> &[KeySpec] {
        &self.keys
    }

    /// Look up a declared key
    pub fn get_key(&self, name: &str) -> Option<&KeySpec> {
        self.keys.iter().find(|k| k.name() == name)
    }

    /// Whether `name` is a declared key
    pub fn has_key(&self, name: &str) -> bool {
        self.get_key(name).is_some()
    }

    /// Keys declared absent, in declaration order
    pub fn no_keys(&self) -> &[String] {
        &self.no_keys
    }

    /// Whether `name` is declared absent
    pub fn has_no_key(&self, name: &str) -> bool {
        self.no_keys.iter().any(|k| k == name)
    }

    /// Wire-level member name for a declared key
    pub fn member_name_for(&self, key: &KeySpec, dasherized: bool) -> String {
        resolve_member_name(
            key.name(),
            key.member_name_style_override(),
            self.member_name_style.as_ref(),
            dasherized,
        )
    }

    /// Wire-level member name for a forbidden key
    pub fn no_key_member_name(&self, name: &str, dasherized: bool) -> String {
        resolve_member_name(name, None, self.member_name_style.as_ref(), dasherized)
    }

    /// Wire-level member names of every declared key
    pub fn declared_member_names(&self, dasherized: bool) -> HashSet<String> {
        self.keys
            .iter()
            .map(|key| self.member_name_for(key, dasherized))
            .collect()
    }
}
