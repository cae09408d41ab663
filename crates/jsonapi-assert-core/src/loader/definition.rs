//! Serde model of payload definition files
//!
//! ```yaml
//! - name: post
//!   type: blog-posts
//!   timestamps: true
//!   keys:
//!     - title
//!     - name: views
//!       type: integer
//!     - name: rating
//!       type: [integer, float]
//!       allow_nil: true
//!     - name: first_title_letter
//!       from: title_initial
//!   no_keys: [secret]
//! ```

use super::error::{LoaderError, LoaderResult};
use crate::payload::{JsonType, MemberNameStyle, Payload, TypeConstraint};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of one definition file: a single definition or a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefinitionFile {
    Many(Vec<PayloadDefinition>),
    One(PayloadDefinition),
}

impl DefinitionFile {
    pub fn into_definitions(self) -> Vec<PayloadDefinition> {
        match self {
            DefinitionFile::Many(definitions) => definitions,
            DefinitionFile::One(definition) => vec![definition],
        }
    }
}

/// One payload as written in a definition file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PayloadDefinition {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_name_style: Option<String>,
    #[serde(default)]
    pub timestamps: bool,
    #[serde(default)]
    pub keys: Vec<KeyEntry>,
    #[serde(default)]
    pub no_keys: Vec<String>,
}

/// A key written either as a bare name or with options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyEntry {
    Name(String),
    Full(KeyDefinition),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyDefinition {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_spec: Option<TypeSpec>,
    #[serde(default)]
    pub allow_nil: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_name_style: Option<String>,
    /// Record attribute to read instead of the key's own name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

/// `type: integer` or `type: [integer, string]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSpec {
    One(JsonType),
    AnyOf(Vec<JsonType>),
}

impl TypeSpec {
    fn to_constraint(&self) -> Option<TypeConstraint> {
        match self {
            TypeSpec::One(json_type) => Some(TypeConstraint::one(*json_type)),
            TypeSpec::AnyOf(types) if types.is_empty() => None,
            TypeSpec::AnyOf(types) => Some(TypeConstraint::any_of(types.iter().copied())),
        }
    }
}

impl PayloadDefinition {
    /// Build the payload schema; `path` is used for error context only
    pub fn to_payload(&self, path: &Path) -> LoaderResult<Payload> {
        if self.name.trim().is_empty() {
            return Err(LoaderError::invalid(path, "payload name must not be empty"));
        }

        let mut payload = Payload::new(self.name.as_str());
        if let Some(resource_type) = &self.resource_type {
            payload.resource_type(resource_type.as_str());
        }
        if let Some(style) = &self.member_name_style {
            payload.member_name_style(parse_style(style, path)?);
        }
        if self.timestamps {
            payload.timestamps();
        }

        for entry in &self.keys {
            match entry {
                KeyEntry::Name(name) => {
                    check_key_name(name, &self.name, path)?;
                    payload.key(name.as_str());
                }
                KeyEntry::Full(definition) => {
                    check_key_name(&definition.name, &self.name, path)?;
                    let style = match &definition.member_name_style {
                        Some(style) => Some(parse_style(style, path)?),
                        None => None,
                    };
                    let constraint = match &definition.type_spec {
                        Some(spec) => Some(spec.to_constraint().ok_or_else(|| {
                            LoaderError::invalid(
                                path,
                                format!("key '{}' declares an empty type list", definition.name),
                            )
                        })?),
                        None => None,
                    };

                    let key = payload.key(definition.name.as_str());
                    key.set_allow_nil(definition.allow_nil);
                    if let Some(constraint) = constraint {
                        key.of_type(constraint);
                    }
                    if let Some(style) = style {
                        key.member_name_style(style);
                    }
                    if let Some(attribute) = &definition.from {
                        key.read_from(attribute.as_str());
                    }
                }
            }
        }

        for name in &self.no_keys {
            check_key_name(name, &self.name, path)?;
            payload.no_key(name.as_str());
        }

        Ok(payload)
    }
}

fn parse_style(name: &str, path: &Path) -> LoaderResult<MemberNameStyle> {
    MemberNameStyle::from_name(name).ok_or_else(|| {
        LoaderError::invalid(
            path,
            format!(
                "unknown member_name_style '{}' (expected underscore, hyphen or titleize)",
                name
            ),
        )
    })
}

fn check_key_name(name: &str, payload: &str, path: &Path) -> LoaderResult<()> {
    if name.trim().is_empty() {
        return Err(LoaderError::invalid(
            path,
            format!("payload '{}' declares a key with an empty name", payload),
        ));
    }
    Ok(())
}
