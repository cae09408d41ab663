//! Payload assertion orchestrator
//!
//! Walks a payload schema and an actual JSON object together, running every
//! check before reporting. Configuration problems (a non-object target, a
//! failing producer) abort immediately; mismatches are aggregated into one
//! [`AssertionFailure`].
//!
//! Copyright (c) 2025 jsonapi-assert contributors
//! Licensed under the MIT OR Apache-2.0 license

use crate::error::{Error, Result};
use crate::matchers::{self, AssertionFailure, FailureAggregator};
use crate::payload::{JsonType, Payload};
use crate::record::Record;
use serde_json::{Map, Value};

/// Label of the aggregation scope opened by every payload assertion
pub const AGGREGATION_LABEL: &str = "payload has correct key/values";

/// Options for one assertion call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssertOptions {
    /// Render declared keys with dashes unless a style is declared
    pub dasherized: bool,
}

impl AssertOptions {
    /// Default options: underscore member names
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect dasherized member names
    pub fn dasherized(mut self) -> Self {
        self.dasherized = true;
        self
    }
}

/// One assertion of a payload schema against a JSON object
#[derive(Debug)]
pub struct PayloadAssertion<'a> {
    payload: &'a Payload,
    options: AssertOptions,
}

impl<'a> PayloadAssertion<'a> {
    /// Prepare an assertion
    pub fn new(payload: &'a Payload, options: AssertOptions) -> Self {
        Self { payload, options }
    }

    /// Run every check; Ok when all pass, [`Error::Assertion`] otherwise
    pub fn check(&self, record: &dyn Record, json: &Value) -> Result<()> {
        match self.collect_failures(record, json)? {
            None => Ok(()),
            Some(failure) => Err(Error::Assertion(failure)),
        }
    }

    /// Run every check and return the aggregated failure, if any
    ///
    /// The outer `Result` only carries configuration errors.
    pub fn collect_failures(
        &self,
        record: &dyn Record,
        json: &Value,
    ) -> Result<Option<AssertionFailure>> {
        let object = json.as_object().ok_or_else(|| Error::NotAnObject {
            actual: JsonType::of(json).to_string(),
        })?;

        let mut aggregator = FailureAggregator::new(AGGREGATION_LABEL);
        self.check_keys(record, object, &mut aggregator)?;
        self.check_no_keys(object, &mut aggregator);
        self.check_unexpected_keys(object, &mut aggregator);

        if !aggregator.is_empty() {
            log::debug!(
                "Payload '{}' failed with {} failure(s)",
                self.payload.name(),
                aggregator.len()
            );
        }
        Ok(aggregator.into_result().err())
    }

    fn check_keys(
        &self,
        record: &dyn Record,
        object: &Map<String, Value>,
        aggregator: &mut FailureAggregator,
    ) -> Result<()> {
        for key in self.payload.keys() {
            let member_name = self.payload.member_name_for(key, self.options.dasherized);
            log::trace!("Checking key '{}' as member '{}'", key.name(), member_name);

            let present =
                aggregator.check(matchers::has_payload_key(object, &member_name, key.allows_nil()));
            if !present || key.allows_nil() {
                continue;
            }

            let actual = object.get(&member_name).unwrap_or(&Value::Null);
            let expected = key.expected_value(record)?;
            aggregator.check(matchers::match_payload(&member_name, actual, &expected));

            if let Some(constraint) = key.type_constraint() {
                aggregator.check(matchers::match_type(&member_name, actual, constraint));
            }
        }
        Ok(())
    }

    fn check_no_keys(&self, object: &Map<String, Value>, aggregator: &mut FailureAggregator) {
        for name in self.payload.no_keys() {
            let member_name = self.payload.no_key_member_name(name, self.options.dasherized);
            aggregator.check(matchers::lacks_payload_key(object, &member_name));
        }
    }

    fn check_unexpected_keys(&self, object: &Map<String, Value>, aggregator: &mut FailureAggregator) {
        let declared = self.payload.declared_member_names(self.options.dasherized);
        for member_name in matchers::unexpected_keys(object, &declared) {
            aggregator.push(matchers::unexpected_key(member_name, object.get(member_name)));
        }
    }
}

/// Assert a registered payload, panicking with the combined report on failure
///
/// ```rust
/// use jsonapi_assert_core::{assert_payload, Registry};
/// use serde_json::json;
///
/// let mut registry = Registry::new();
/// registry.register("post", |p| {
///     p.key("title");
/// });
/// let record = json!({"title": "hello"});
/// assert_payload!(registry, "post", &record, &json!({"id": "1", "title": "hello"}));
///
/// // A closure customizes a fork of the payload for this call only
/// assert_payload!(
///     registry,
///     "post",
///     &record,
///     &json!({"title": "hello", "subtitle": null}),
///     jsonapi_assert_core::AssertOptions::new(),
///     |p| {
///         p.key("subtitle").allow_nil();
///     }
/// );
/// ```
#[macro_export]
macro_rules! assert_payload {
    (@report $result:expr) => {
        match $result {
            Ok(()) => {}
            Err($crate::Error::Assertion(failure)) => {
                panic!(
                    "{}",
                    failure.render($crate::PayloadConfig::from_env().colored)
                )
            }
            Err(err) => panic!("{}", err),
        }
    };
    ($registry:expr, $name:expr, $record:expr, $json:expr $(,)?) => {
        $crate::assert_payload!(
            $registry,
            $name,
            $record,
            $json,
            $crate::PayloadConfig::from_env().assert_options()
        )
    };
    ($registry:expr, $name:expr, $record:expr, $json:expr, $options:expr $(,)?) => {
        $crate::assert_payload!(@report
            $registry.assert_payload_with_options($name, $record, $json, &$options))
    };
    ($registry:expr, $name:expr, $record:expr, $json:expr, $options:expr, $customize:expr $(,)?) => {
        $crate::assert_payload!(@report
            $registry.assert_payload_with($name, $record, $json, &$options, $customize))
    };
}
