//! Failure records produced by the matchers and their aggregation
//!
//! Copyright (c) 2025 jsonapi-assert contributors
//! Licensed under the MIT OR Apache-2.0 license

use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// What a failed check was about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// Declared key absent from the payload
    MissingKey,
    /// Declared key present but null without `allow_nil`
    NilValue,
    /// Value differs from the producer's expected value
    ValueMismatch,
    /// Value does not satisfy the declared type constraint
    TypeMismatch,
    /// Key declared absent was present with a value
    ForbiddenKey,
    /// Key present in the payload but never declared
    UnexpectedKey,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::MissingKey => write!(f, "missing_key"),
            FailureKind::NilValue => write!(f, "nil_value"),
            FailureKind::ValueMismatch => write!(f, "value_mismatch"),
            FailureKind::TypeMismatch => write!(f, "type_mismatch"),
            FailureKind::ForbiddenKey => write!(f, "forbidden_key"),
            FailureKind::UnexpectedKey => write!(f, "unexpected_key"),
        }
    }
}

/// One failed check with its diagnostic message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Failure {
    /// Kind of check that failed
    pub kind: FailureKind,
    /// Wire-level member name the check was about
    pub member_name: String,
    /// Human-readable diagnostic
    pub message: String,
    /// Expected value, when one was computed
    pub expected: Option<Value>,
    /// Actual value, when one was present
    pub actual: Option<Value>,
}

impl Failure {
    /// Create a failure without value context
    pub fn new<N, M>(kind: FailureKind, member_name: N, message: M) -> Self
    where
        N: Into<String>,
        M: Into<String>,
    {
        Self {
            kind,
            member_name: member_name.into(),
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    /// Attach the expected value
    pub fn with_expected(mut self, expected: Value) -> Self {
        self.expected = Some(expected);
        self
    }

    /// Attach the actual value
    pub fn with_actual(mut self, actual: Value) -> Self {
        self.actual = Some(actual);
        self
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Every failure collected during one payload assertion
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub struct AssertionFailure {
    /// Name of the aggregation scope
    pub label: String,
    /// Failures in check order
    pub failures: Vec<Failure>,
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(false))
    }
}

impl AssertionFailure {
    /// Number of failures
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Whether no failure was recorded
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Iterate failures in check order
    pub fn iter(&self) -> std::slice::Iter<'_, Failure> {
        self.failures.iter()
    }

    /// Diagnostic messages in check order
    pub fn messages(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.message.as_str()).collect()
    }

    /// Failures concerning one member name
    pub fn failures_for(&self, member_name: &str) -> Vec<&Failure> {
        self.failures
            .iter()
            .filter(|f| f.member_name == member_name)
            .collect()
    }

    /// Failures of one kind
    pub fn failures_of(&self, kind: FailureKind) -> Vec<&Failure> {
        self.failures.iter().filter(|f| f.kind == kind).collect()
    }

    /// Render the combined report, optionally with terminal colors
    pub fn render(&self, colored: bool) -> String {
        let count = self.failures.len();
        let header = format!(
            "Got {} failure{} from failure aggregation block \"{}\":",
            count,
            if count == 1 { "" } else { "s" },
            self.label
        );

        let mut output = if colored {
            header.red().bold().to_string()
        } else {
            header
        };

        for (i, failure) in self.failures.iter().enumerate() {
            let number = format!("{})", i + 1);
            let number = if colored {
                number.yellow().to_string()
            } else {
                number
            };
            output.push_str(&format!("\n  {} {}", number, failure.message));
        }

        output
    }
}

impl<'a> IntoIterator for &'a AssertionFailure {
    type Item = &'a Failure;
    type IntoIter = std::slice::Iter<'a, Failure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.iter()
    }
}

/// Collects failures so every check runs before anything is reported
#[derive(Debug)]
pub struct FailureAggregator {
    label: String,
    failures: Vec<Failure>,
}

impl FailureAggregator {
    /// Open an aggregation scope
    pub fn new<L: Into<String>>(label: L) -> Self {
        Self {
            label: label.into(),
            failures: Vec::new(),
        }
    }

    /// Record a check result; returns whether it passed
    pub fn check(&mut self, result: Result<(), Failure>) -> bool {
        match result {
            Ok(()) => true,
            Err(failure) => {
                self.failures.push(failure);
                false
            }
        }
    }

    /// Record a failure directly
    pub fn push(&mut self, failure: Failure) {
        self.failures.push(failure);
    }

    /// Number of failures so far
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Whether every check so far passed
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Close the scope: Ok if nothing failed, otherwise one combined failure
    pub fn into_result(self) -> Result<(), AssertionFailure> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(AssertionFailure {
                label: self.label,
                failures: self.failures,
            })
        }
    }
}
