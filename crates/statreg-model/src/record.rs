//! Preview records and row-level validation errors.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One file row materialized into named fields, exactly as it will be
/// sent to the commit step.
///
/// Values keep their textual source representation until commit; dates
/// are validated but not normalized at this stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreviewRecord(BTreeMap<String, String>);

impl PreviewRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// The value of a field, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterates `(field key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of populated fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PreviewRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Splits a multi-valued cell into its semicolon-separated entries.
///
/// Empty entries are dropped, so `"Shares; ; Voting"` yields two tags.
pub fn split_tags(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

/// A validation failure for one file row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowValidationError {
    /// 1-based row number within the file's data rows.
    pub row: usize,
    /// User-facing description of what is wrong.
    pub message: String,
}

impl fmt::Display for RowValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}", self.row, self.message)
    }
}

/// Aggregate of every failing row in a preview.
///
/// Validation never short-circuits across rows: each failing row
/// contributes exactly one line to the rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// One entry per failing row, in row order.
    pub errors: Vec<RowValidationError>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, error) in self.errors.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}
