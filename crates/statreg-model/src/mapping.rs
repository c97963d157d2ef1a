//! Column mapping and confidence types for the mapping step.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::TargetSchema;

/// Assignment from target field keys to file header names.
///
/// Two fields may reference the same header; that is almost always a
/// mapping mistake, but it is the operator's to make. Serializes to a
/// plain JSON object, which is the shape the import endpoints expect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping(BTreeMap<String, String>);

impl ColumnMapping {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a header to a field key, replacing any previous choice.
    pub fn set(&mut self, key: impl Into<String>, header: impl Into<String>) {
        self.0.insert(key.into(), header.into());
    }

    /// Removes the assignment for a field key, returning the old header.
    pub fn clear(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// The header assigned to a field key, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of assigned fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no field is assigned.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates `(field key, header)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True when every required field of `schema` has an assignment.
    pub fn covers_required(&self, schema: &TargetSchema) -> bool {
        schema.required_fields().all(|f| self.0.contains_key(&f.key))
    }
}

/// Similarity score per assigned field, in `[0, 1]`.
///
/// Present only for fields that were auto- or manually assigned; a
/// manual assignment always scores 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfidenceScore(BTreeMap<String, f64>);

impl ConfidenceScore {
    /// Creates an empty score map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the score for a field key.
    pub fn set(&mut self, key: impl Into<String>, score: f64) {
        self.0.insert(key.into(), score);
    }

    /// Removes the score for a field key.
    pub fn clear(&mut self, key: &str) -> Option<f64> {
        self.0.remove(key)
    }

    /// The score for a field key, if one was recorded.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// True when no score is recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldSpec;

    #[test]
    fn mapping_serializes_as_plain_object() {
        let mut mapping = ColumnMapping::new();
        mapping.set("firstName", "First Name");
        mapping.set("lastName", "Surname");
        let json = serde_json::to_string(&mapping).unwrap();
        assert_eq!(json, r#"{"firstName":"First Name","lastName":"Surname"}"#);
    }

    #[test]
    fn covers_required_ignores_optional_fields() {
        let schema = TargetSchema::new(
            "shares",
            vec![
                FieldSpec::new("class", "Class Name"),
                FieldSpec::new("description", "Description").optional(),
            ],
        )
        .unwrap();

        let mut mapping = ColumnMapping::new();
        assert!(!mapping.covers_required(&schema));
        mapping.set("class", "Class");
        assert!(mapping.covers_required(&schema));
    }

    #[test]
    fn clearing_returns_previous_assignment() {
        let mut mapping = ColumnMapping::new();
        mapping.set("status", "State");
        assert_eq!(mapping.clear("status"), Some("State".to_string()));
        assert_eq!(mapping.get("status"), None);
    }
}
