//! Structured error types shared across strand crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`ReportError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (offending token, allowed alternatives, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

/// Canonical error type for report generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum ReportError {
    /// The category part of a query is not part of the grammar.
    #[error("unknown category: {0}")]
    UnknownCategory(ErrorInfo),
    /// The category is known but the subcategory is not.
    #[error("unknown subcategory: {0}")]
    UnknownSubcategory(ErrorInfo),
    /// A `single:NAME` or `couple:NAME` query named a class that does not exist.
    #[error("unknown configuration class: {0}")]
    UnknownConfigurationClass(ErrorInfo),
    /// An option or argument has an invalid value or type.
    #[error("invalid parameter: {0}")]
    InvalidParameter(ErrorInfo),
    /// The simulation state is inconsistent.
    #[error("state error: {0}")]
    State(ErrorInfo),
    /// Writing to the output sink or reading an input file failed.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Snapshot or configuration (de)serialization failed.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl ReportError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            ReportError::UnknownCategory(info)
            | ReportError::UnknownSubcategory(info)
            | ReportError::UnknownConfigurationClass(info)
            | ReportError::InvalidParameter(info)
            | ReportError::State(info)
            | ReportError::Io(info)
            | ReportError::Serde(info) => info,
        }
    }

    /// Builds an [`ReportError::UnknownCategory`] naming the token and the known categories.
    pub fn unknown_category(token: &str, allowed: &[&str]) -> Self {
        ReportError::UnknownCategory(
            ErrorInfo::new(
                "unknown_category",
                format!("I do not know how to write `{token}`"),
            )
            .with_context("category", token)
            .with_context("allowed", allowed.join(", ")),
        )
    }

    /// Builds an [`ReportError::UnknownSubcategory`] listing the alternatives of `category`.
    pub fn unknown_subcategory(category: &str, token: &str, allowed: &[&str]) -> Self {
        ReportError::UnknownSubcategory(
            ErrorInfo::new(
                "unknown_subcategory",
                format!(
                    "`{category}:{token}` is not a report; I only know {category}: {}",
                    allowed.join(", ")
                ),
            )
            .with_context("category", category)
            .with_context("subcategory", token)
            .with_context("allowed", allowed.join(", ")),
        )
    }

    /// Builds an [`ReportError::UnknownConfigurationClass`] listing the classes defined for `kind`.
    pub fn unknown_class(kind: &str, name: &str, allowed: &[&str]) -> Self {
        let message = if allowed.is_empty() {
            format!("unknown {kind} `{name}`; no {kind} class is defined")
        } else {
            format!("unknown {kind} `{name}`; known classes: {}", allowed.join(", "))
        };
        ReportError::UnknownConfigurationClass(
            ErrorInfo::new("unknown_class", message)
                .with_context("kind", kind)
                .with_context("name", name)
                .with_context("allowed", allowed.join(", ")),
        )
    }

    /// Builds an [`ReportError::InvalidParameter`] for the given option key.
    pub fn invalid_parameter(key: &str, message: impl Into<String>) -> Self {
        ReportError::InvalidParameter(
            ErrorInfo::new("invalid_parameter", message).with_context("key", key),
        )
    }

    /// Wraps an I/O failure.
    pub fn io(code: &str, err: impl ToString) -> Self {
        ReportError::Io(ErrorInfo::new(code, err.to_string()))
    }

    /// Wraps a serialization failure.
    pub fn serde(code: &str, err: impl ToString) -> Self {
        ReportError::Serde(ErrorInfo::new(code, err.to_string()))
    }
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::io("report_write", err)
    }
}
