//! Payload definition loading from YAML and JSON files
//!
//! Copyright (c) 2025 jsonapi-assert contributors
//! Licensed under the MIT OR Apache-2.0 license

pub mod definition;
pub mod error;

pub use definition::{DefinitionFile, KeyDefinition, KeyEntry, PayloadDefinition, TypeSpec};
pub use error::{LoaderError, LoaderResult};

use crate::payload::Payload;
use serde_json::Value;
use std::path::Path;
use walkdir::WalkDir;

/// Supported definition file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(LoaderError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Reads payload definitions into [`Payload`] schemas
#[derive(Debug, Default, Clone, Copy)]
pub struct PayloadLoader;

impl PayloadLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load every definition in one file
    pub fn load_file(&self, path: &Path) -> LoaderResult<Vec<Payload>> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| LoaderError::io(path, e))?;
        self.parse_content(&content, format, path)
    }

    /// Parse definition content with an explicit format
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> LoaderResult<Vec<Payload>> {
        let value = match format {
            Format::Yaml => {
                let yaml: serde_yaml::Value =
                    serde_yaml::from_str(content).map_err(|e| LoaderError::yaml(path, e))?;
                serde_json::to_value(yaml).map_err(|e| LoaderError::json(path, e))?
            }
            Format::Json => {
                serde_json::from_str::<Value>(content).map_err(|e| LoaderError::json(path, e))?
            }
        };

        let file: DefinitionFile =
            serde_json::from_value(value).map_err(|e| LoaderError::json(path, e))?;

        file.into_definitions()
            .iter()
            .map(|definition| definition.to_payload(path))
            .collect()
    }

    /// Load every `.json`, `.yaml` and `.yml` file under `dir`, in path order
    pub fn load_dir(&self, dir: &Path) -> LoaderResult<Vec<Payload>> {
        let mut payloads = Vec::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| LoaderError::Walk {
                path: e.path().unwrap_or(dir).to_path_buf(),
                source: e,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if Format::from_path(path).is_err() {
                log::debug!("Skipping non-definition file {}", path.display());
                continue;
            }

            log::debug!("Loading payload definitions from {}", path.display());
            payloads.extend(self.load_file(path)?);
        }

        Ok(payloads)
    }
}
