//! Free-form option bag handed to every report.
//!
//! Reports pull the keys they recognise and fall back to documented defaults
//! when a key is absent. A present key of the wrong type is an
//! [`ReportError::InvalidParameter`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ReportError;

/// Typed value stored under an option key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Boolean, as written by YAML or JSON `true`/`false`.
    Flag(bool),
    /// Single scalar.
    Number(f64),
    /// Ordered list of scalars.
    Vector(Vec<f64>),
    /// Anything that is not numeric.
    Text(String),
}

impl OptionValue {
    /// Interprets a raw textual value.
    ///
    /// Tokens are separated by whitespace or commas. A single numeric token
    /// gives a [`OptionValue::Number`], several give a [`OptionValue::Vector`],
    /// and anything else is kept verbatim as [`OptionValue::Text`].
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let tokens: Vec<&str> = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .collect();
        let numbers: Option<Vec<f64>> = tokens.iter().map(|token| token.parse().ok()).collect();
        match numbers {
            Some(values) if values.len() == 1 => OptionValue::Number(values[0]),
            Some(values) if values.len() > 1 => OptionValue::Vector(values),
            _ => OptionValue::Text(trimmed.to_string()),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            OptionValue::Flag(_) => "boolean",
            OptionValue::Number(_) => "number",
            OptionValue::Vector(_) => "vector",
            OptionValue::Text(_) => "text",
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Flag(flag) => write!(f, "{flag}"),
            OptionValue::Number(value) => write!(f, "{value}"),
            OptionValue::Vector(values) => {
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{value}")?;
                }
                Ok(())
            }
            OptionValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(flag: bool) -> Self {
        OptionValue::Flag(flag)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Number(value)
    }
}

impl From<Vec<f64>> for OptionValue {
    fn from(values: Vec<f64>) -> Self {
        OptionValue::Vector(values)
    }
}

impl From<&str> for OptionValue {
    fn from(text: &str) -> Self {
        OptionValue::Text(text.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(text: String) -> Self {
        OptionValue::Text(text)
    }
}

/// Ordered key to value bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options {
    entries: BTreeMap<String, OptionValue>,
}

impl Options {
    /// Creates an empty option bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style setter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Parses one `key=value` assignment and stores it.
    pub fn parse_assignment(&mut self, raw: &str) -> Result<(), ReportError> {
        let Some((key, value)) = raw.split_once('=') else {
            return Err(ReportError::invalid_parameter(
                raw,
                format!("expected `key=value`, found `{raw}`"),
            ));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(ReportError::invalid_parameter(
                raw,
                format!("missing key in `{raw}`"),
            ));
        }
        self.set(key, OptionValue::parse(value));
        Ok(())
    }

    /// Builds an option bag from a list of `key=value` assignments.
    pub fn from_assignments<I, S>(assignments: I) -> Result<Self, ReportError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::new();
        for raw in assignments {
            options.parse_assignment(raw.as_ref())?;
        }
        Ok(options)
    }

    /// Returns the raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    /// Iterates over keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no key is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reads a scalar, falling back to `default` when the key is absent.
    pub fn number_or(&self, key: &str, default: f64) -> Result<f64, ReportError> {
        match self.entries.get(key) {
            None => Ok(default),
            Some(OptionValue::Number(value)) => Ok(*value),
            Some(other) => Err(wrong_type(key, "number", other)),
        }
    }

    /// Reads a strictly positive, finite scalar with a default.
    pub fn positive_or(&self, key: &str, default: f64) -> Result<f64, ReportError> {
        let value = self.number_or(key, default)?;
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(ReportError::invalid_parameter(
                key,
                format!("`{key}` must be a positive number, found {value}"),
            ))
        }
    }

    /// Reads a list of scalars. A single number reads as a one element list.
    pub fn vector(&self, key: &str) -> Result<Option<Vec<f64>>, ReportError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(OptionValue::Number(value)) => Ok(Some(vec![*value])),
            Some(OptionValue::Vector(values)) => Ok(Some(values.clone())),
            Some(other) => Err(wrong_type(key, "vector", other)),
        }
    }

    /// Reads a boolean written as a flag, a number (`0` is false) or `true`/`false`.
    pub fn flag_or(&self, key: &str, default: bool) -> Result<bool, ReportError> {
        match self.entries.get(key) {
            None => Ok(default),
            Some(OptionValue::Flag(flag)) => Ok(*flag),
            Some(OptionValue::Number(value)) => Ok(*value != 0.0),
            Some(OptionValue::Text(text)) => match text.as_str() {
                "true" | "yes" | "on" => Ok(true),
                "false" | "no" | "off" => Ok(false),
                _ => Err(ReportError::invalid_parameter(
                    key,
                    format!("`{key}` must be a boolean, found `{text}`"),
                )),
            },
            Some(other) => Err(wrong_type(key, "boolean", other)),
        }
    }
}

fn wrong_type(key: &str, expected: &str, found: &OptionValue) -> ReportError {
    ReportError::InvalidParameter(
        crate::errors::ErrorInfo::new(
            "invalid_parameter",
            format!(
                "`{key}` must be a {expected}, found {} `{found}`",
                found.type_name()
            ),
        )
        .with_context("key", key)
        .with_context("expected", expected),
    )
}
