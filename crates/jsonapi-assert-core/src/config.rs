//! Configuration for payload registries and assertion reports
//!
//! Copyright (c) 2025 jsonapi-assert contributors
//! Licensed under the MIT OR Apache-2.0 license

use crate::assertion::AssertOptions;
use std::path::PathBuf;

/// Directory of payload definition files to load into new registries
pub const PAYLOAD_DIR_VAR: &str = "JSONAPI_ASSERT_PAYLOAD_DIR";
/// Colorize rendered failure reports
pub const COLOR_VAR: &str = "JSONAPI_ASSERT_COLOR";
/// Expect dasherized member names by default
pub const DASHERIZED_VAR: &str = "JSONAPI_ASSERT_DASHERIZED";

/// Suite-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayloadConfig {
    /// Definition directory loaded by [`Registry::from_config`](crate::Registry::from_config)
    pub payload_dir: Option<PathBuf>,
    /// Whether rendered reports use terminal colors
    pub colored: bool,
    /// Default for [`AssertOptions::dasherized`]
    pub dasherized: bool,
}

impl PayloadConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(PAYLOAD_DIR_VAR).filter(|dir| !dir.is_empty()) {
            config.payload_dir = Some(PathBuf::from(dir));
        }

        if let Some(colored) = lookup(COLOR_VAR) {
            config.colored = is_truthy(&colored);
        }

        if let Some(dasherized) = lookup(DASHERIZED_VAR) {
            config.dasherized = is_truthy(&dasherized);
        }

        config
    }

    pub fn with_payload_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.payload_dir = Some(dir.into());
        self
    }

    pub fn with_colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn with_dasherized(mut self, dasherized: bool) -> Self {
        self.dasherized = dasherized;
        self
    }

    /// Assertion options implied by this configuration
    pub fn assert_options(&self) -> AssertOptions {
        AssertOptions {
            dasherized: self.dasherized,
        }
    }
}

fn is_truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
