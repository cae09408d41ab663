//! Error types for the payload assertion library
//!
//! Two kinds of failure live here. Configuration errors (an unknown payload
//! name, a record missing an attribute, an unsanitizable request body) abort
//! the current call immediately. Assertion failures are collected by the
//! orchestrator and surface once as [`Error::Assertion`].

use crate::loader::LoaderError;
use crate::matchers::AssertionFailure;
use crate::sanitizer::SanitizeError;
use thiserror::Error;

/// Main error type for payload operations
#[derive(Error, Debug)]
pub enum Error {
    /// No payload registered under the requested name
    #[error("No payloads registered for '{name}'")]
    PayloadNotRegistered { name: String },

    /// A default producer asked the record for an attribute it does not expose
    #[error("Record has no attribute '{attribute}'")]
    AttributeNotFound { attribute: String },

    /// A custom producer failed to compute its expected value
    #[error("Producer for key '{key}' failed: {message}")]
    Producer {
        key: String,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// The JSON handed to an assertion is not an object
    #[error("JSON payload must be an object, got {actual}")]
    NotAnObject { actual: String },

    /// One or more soft checks failed during a payload assertion
    #[error(transparent)]
    Assertion(#[from] AssertionFailure),

    /// Request body could not be turned into a JSON:API document
    #[error(transparent)]
    Sanitize(#[from] SanitizeError),

    /// Payload definition files could not be loaded
    #[error(transparent)]
    Loader(#[from] LoaderError),

    /// JSON serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a producer error from any displayable message
    pub fn producer<K, M>(key: K, message: M) -> Self
    where
        K: Into<String>,
        M: Into<String>,
    {
        Error::Producer {
            key: key.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Whether this error is a soft assertion failure rather than a configuration error
    pub fn is_assertion_failure(&self) -> bool {
        matches!(self, Error::Assertion(_))
    }

    /// The aggregated failure, if this error carries one
    pub fn as_assertion_failure(&self) -> Option<&AssertionFailure> {
        match self {
            Error::Assertion(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json {
            message: source.to_string(),
            source,
        }
    }
}
