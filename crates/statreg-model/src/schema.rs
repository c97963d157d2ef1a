//! Target schema types describing what an import must populate.
//!
//! A [`TargetSchema`] is the fixed, ordered list of fields for one
//! register type, supplied by the surrounding application per entity.
//! Field kinds and cross-field rules carry the semantic validation
//! applied to preview records before an import is committed.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Validation rule for a date-valued field.
///
/// Dates are textual `DD/MM/YYYY` values until commit; the rule bounds
/// how far in the past a parsed date may lie and whether future dates
/// are acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateRule {
    /// Whether dates after today are accepted.
    pub allow_future: bool,
    /// Maximum number of years a date may lie in the past.
    pub max_years_in_past: i32,
}

impl Default for DateRule {
    fn default() -> Self {
        Self {
            allow_future: false,
            max_years_in_past: 150,
        }
    }
}

impl DateRule {
    /// Rule for a person's date of birth: never in the future, and the
    /// implied age must stay within a plausible human range.
    pub fn birth_date() -> Self {
        Self {
            allow_future: false,
            max_years_in_past: 120,
        }
    }
}

/// Closed interval for a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumberRule {
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
}

impl NumberRule {
    /// The `[0, 100]` interval used by percentage fields.
    pub fn percentage() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
        }
    }

    /// Returns true when `value` lies within the interval.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Value semantics of a target field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Free text, no validation beyond presence.
    Text,
    /// `DD/MM/YYYY` date validated against a [`DateRule`].
    Date(DateRule),
    /// Number validated against a closed interval.
    Number(NumberRule),
    /// The literal strings `true` or `false`.
    Boolean,
    /// Semicolon-separated list held in a single cell.
    Tags,
}

/// A single field an import must populate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Unique key within the schema, used in mappings and records.
    pub key: String,
    /// Human label shown to the operator and matched against file headers.
    pub label: String,
    /// Whether the field may be left unmapped and empty.
    pub optional: bool,
    /// Value semantics applied during validation.
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Creates a required text field.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            optional: false,
            kind: FieldKind::Text,
        }
    }

    /// Marks the field as optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Sets the field's value kind.
    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }
}

/// A validation rule spanning more than one field of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CrossFieldRule {
    /// The date in `later` may not precede the date in `earlier`.
    DateOrder { earlier: String, later: String },
    /// The person born on `birth` must be at least `years` old on `event`.
    MinimumAgeAt {
        birth: String,
        event: String,
        years: i32,
    },
}

impl CrossFieldRule {
    fn referenced_keys(&self) -> [&str; 2] {
        match self {
            Self::DateOrder { earlier, later } => [earlier, later],
            Self::MinimumAgeAt { birth, event, .. } => [birth, event],
        }
    }
}

/// The fixed, ordered set of fields an import must populate for one
/// register type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetSchema {
    entity: String,
    fields: Vec<FieldSpec>,
    rules: Vec<CrossFieldRule>,
}

impl TargetSchema {
    /// Builds a schema, rejecting duplicate field keys.
    pub fn new(entity: impl Into<String>, fields: Vec<FieldSpec>) -> Result<Self, SchemaError> {
        let entity = entity.into();
        if fields.is_empty() {
            return Err(SchemaError::Empty { entity });
        }
        for (idx, field) in fields.iter().enumerate() {
            if fields[..idx].iter().any(|f| f.key == field.key) {
                return Err(SchemaError::DuplicateKey {
                    entity,
                    key: field.key.clone(),
                });
            }
        }
        Ok(Self {
            entity,
            fields,
            rules: Vec::new(),
        })
    }

    /// Attaches cross-field rules, rejecting references to unknown keys.
    pub fn with_rules(mut self, rules: Vec<CrossFieldRule>) -> Result<Self, SchemaError> {
        for rule in &rules {
            for key in rule.referenced_keys() {
                if self.field(key).is_none() {
                    return Err(SchemaError::UnknownRuleField {
                        entity: self.entity.clone(),
                        key: key.to_string(),
                    });
                }
            }
        }
        self.rules = rules;
        Ok(self)
    }

    /// The entity path segment this schema belongs to (e.g. `directors`).
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// All fields, in schema order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Cross-field rules attached to this schema.
    pub fn rules(&self) -> &[CrossFieldRule] {
        &self.rules
    }

    /// Looks up a field by key.
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// The human label for a key, falling back to the key itself.
    pub fn label_for<'a>(&'a self, key: &'a str) -> &'a str {
        self.field(key).map_or(key, |f| f.label.as_str())
    }

    /// Fields that must be mapped before an import can proceed.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| !f.optional)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_keys() {
        let err = TargetSchema::new(
            "directors",
            vec![
                FieldSpec::new("name", "Name"),
                FieldSpec::new("name", "Other Name"),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateKey { key, .. } if key == "name"));
    }

    #[test]
    fn rejects_empty_schema() {
        let err = TargetSchema::new("directors", Vec::new()).unwrap_err();
        assert!(matches!(err, SchemaError::Empty { .. }));
    }

    #[test]
    fn rejects_rule_with_unknown_field() {
        let schema = TargetSchema::new("charges", vec![FieldSpec::new("created", "Date Created")])
            .unwrap()
            .with_rules(vec![CrossFieldRule::DateOrder {
                earlier: "created".into(),
                later: "registered".into(),
            }]);
        assert!(matches!(
            schema.unwrap_err(),
            SchemaError::UnknownRuleField { key, .. } if key == "registered"
        ));
    }

    #[test]
    fn required_fields_excludes_optional() {
        let schema = TargetSchema::new(
            "shares",
            vec![
                FieldSpec::new("class", "Class Name"),
                FieldSpec::new("description", "Description").optional(),
            ],
        )
        .unwrap();
        let required: Vec<_> = schema.required_fields().map(|f| f.key.as_str()).collect();
        assert_eq!(required, vec!["class"]);
    }

    #[test]
    fn percentage_interval_is_closed() {
        let rule = NumberRule::percentage();
        assert!(rule.contains(0.0));
        assert!(rule.contains(100.0));
        assert!(!rule.contains(100.1));
        assert!(!rule.contains(-0.1));
    }
}
