//! Working state of the mapping step.

use statreg_model::{ColumnMapping, ConfidenceScore, FieldSpec, TargetSchema};

use crate::engine::{AutoMapOutcome, auto_map};

/// The active column assignment plus per-field confidence, as edited by
/// the operator on top of the auto-mapper's suggestions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingState {
    /// Current field-to-header assignment.
    pub mapping: ColumnMapping,
    /// Confidence per assigned field; manual choices score 1.0.
    pub confidence: ConfidenceScore,
}

impl MappingState {
    /// Seeds the state from an auto-mapping pass over the file headers.
    pub fn from_auto(headers: &[String], schema: &TargetSchema) -> Self {
        let AutoMapOutcome {
            mapping,
            confidence,
        } = auto_map(headers, schema);
        Self {
            mapping,
            confidence,
        }
    }

    /// Applies an explicit operator choice for a field.
    ///
    /// Manual selection is fully trusted: confidence becomes 1.0.
    pub fn set_manual(&mut self, key: &str, header: &str) {
        self.mapping.set(key, header);
        self.confidence.set(key, 1.0);
    }

    /// Removes the assignment for a field.
    ///
    /// The field falls back to unmapped, not to the auto suggestion, and
    /// its confidence entry disappears with it.
    pub fn clear(&mut self, key: &str) {
        self.mapping.clear(key);
        self.confidence.clear(key);
    }

    /// The header currently assigned to a field.
    pub fn header_for(&self, key: &str) -> Option<&str> {
        self.mapping.get(key)
    }

    /// The confidence recorded for a field, if it is assigned.
    pub fn confidence_for(&self, key: &str) -> Option<f64> {
        self.confidence.get(key)
    }

    /// Required fields of `schema` that still lack an assignment.
    pub fn unmapped_required<'a>(&self, schema: &'a TargetSchema) -> Vec<&'a FieldSpec> {
        schema
            .required_fields()
            .filter(|f| self.mapping.get(&f.key).is_none())
            .collect()
    }

    /// True when every required field of `schema` is assigned.
    pub fn is_complete(&self, schema: &TargetSchema) -> bool {
        self.mapping.covers_required(schema)
    }
}
