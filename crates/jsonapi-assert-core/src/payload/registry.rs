//! Named payload registry
//!
//! A registry is an explicit value owned by the test suite rather than
//! process-wide state. Build one per test (or per worker), populate it with
//! [`Registry::register`] before asserting, and [`Registry::clear`] it to
//! start over.
//!
//! Copyright (c) 2025 jsonapi-assert contributors
//! Licensed under the MIT OR Apache-2.0 license

use super::schema::Payload;
use crate::assertion::{AssertOptions, PayloadAssertion};
use crate::config::PayloadConfig;
use crate::error::{Error, Result};
use crate::loader::PayloadLoader;
use crate::record::Record;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Mapping from payload name to schema
#[derive(Debug, Clone, Default)]
pub struct Registry {
    payloads: HashMap<String, Payload>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry and load the definition directory named by `config`, if any
    pub fn from_config(config: &PayloadConfig) -> Result<Self> {
        let mut registry = Self::new();
        if let Some(dir) = &config.payload_dir {
            registry.load_dir(dir)?;
        }
        Ok(registry)
    }

    /// Declare a payload and store it under `name`
    ///
    /// ```rust
    /// use jsonapi_assert_core::{JsonType, Registry};
    ///
    /// let mut registry = Registry::new();
    /// registry.register("post", |p| {
    ///     p.key("title");
    ///     p.key("views").of_type(JsonType::Integer);
    ///     p.timestamps();
    /// });
    /// assert!(registry.contains("post"));
    /// ```
    pub fn register<N, F>(&mut self, name: N, declare: F) -> &Payload
    where
        N: Into<String>,
        F: FnOnce(&mut Payload),
    {
        let mut payload = Payload::new(name);
        declare(&mut payload);
        self.insert(payload)
    }

    /// Store an already-built payload, replacing any payload with the same name
    pub fn insert(&mut self, payload: Payload) -> &Payload {
        let name = payload.name().to_string();
        if self.payloads.contains_key(&name) {
            log::warn!("Replacing registered payload '{}'", name);
        } else {
            log::debug!(
                "Registered payload '{}' with {} keys",
                name,
                payload.keys().len()
            );
        }
        self.payloads.insert(name.clone(), payload);
        &self.payloads[&name]
    }

    /// Look up a payload
    pub fn get(&self, name: &str) -> Option<&Payload> {
        self.payloads.get(name)
    }

    /// Look up a payload, failing when it is not registered
    pub fn fetch(&self, name: &str) -> Result<&Payload> {
        self.get(name).ok_or_else(|| Error::PayloadNotRegistered {
            name: name.to_string(),
        })
    }

    /// Whether a payload is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.payloads.contains_key(name)
    }

    /// Remove and return a payload
    pub fn remove(&mut self, name: &str) -> Option<Payload> {
        self.payloads.remove(name)
    }

    /// Number of registered payloads
    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.payloads.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Drop every registered payload
    pub fn clear(&mut self) {
        log::debug!("Clearing {} registered payloads", self.payloads.len());
        self.payloads.clear();
    }

    /// Load payload definitions from one YAML or JSON file; returns how many were registered
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let payloads = PayloadLoader::new().load_file(path)?;
        Ok(self.insert_all(payloads))
    }

    /// Load every definition file under `dir`; returns how many payloads were registered
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        let payloads = PayloadLoader::new().load_dir(dir)?;
        Ok(self.insert_all(payloads))
    }

    fn insert_all(&mut self, payloads: Vec<Payload>) -> usize {
        let count = payloads.len();
        for payload in payloads {
            self.insert(payload);
        }
        count
    }

    /// Assert that `json` matches the payload registered under `name`
    ///
    /// Returns [`Error::PayloadNotRegistered`] immediately for an unknown
    /// name. Otherwise every check runs, and all failures come back together
    /// as [`Error::Assertion`].
    pub fn assert_payload(&self, name: &str, record: &dyn Record, json: &Value) -> Result<()> {
        self.assert_payload_with_options(name, record, json, &AssertOptions::default())
    }

    /// Like [`assert_payload`](Self::assert_payload) with explicit options
    pub fn assert_payload_with_options(
        &self,
        name: &str,
        record: &dyn Record,
        json: &Value,
        options: &AssertOptions,
    ) -> Result<()> {
        let payload = self.fetch(name)?;
        PayloadAssertion::new(payload, *options).check(record, json)
    }

    /// Assert against a fork of the registered payload customized by `customize`
    ///
    /// The registered payload itself is never modified.
    pub fn assert_payload_with<F>(
        &self,
        name: &str,
        record: &dyn Record,
        json: &Value,
        options: &AssertOptions,
        customize: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut Payload),
    {
        let mut payload = self.fetch(name)?.fork();
        customize(&mut payload);
        PayloadAssertion::new(&payload, *options).check(record, json)
    }
}
