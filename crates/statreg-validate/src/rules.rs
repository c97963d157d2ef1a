//! Client-side semantic validation of preview records.
//!
//! Runs after the preview endpoint has materialized rows and before the
//! operator may advance to the preview step. Within a row the first
//! failing check wins; across rows every failure is kept, so the
//! aggregate names each bad row exactly once. There is no
//! success-with-warnings mode: one failing row blocks the whole import.

use chrono::NaiveDate;
use tracing::debug;

use statreg_model::{
    CrossFieldRule, FieldKind, FieldSpec, PreviewRecord, RowValidationError, TargetSchema,
    ValidationFailure,
};

use crate::dates::{add_years, parse_dmy, within_statutory_range};

/// Validates every record against the schema's field kinds and
/// cross-field rules.
///
/// `today` anchors the statutory date windows; pass the current civil
/// date in production and a fixed one in tests.
pub fn validate_records(
    records: &[PreviewRecord],
    schema: &TargetSchema,
    today: NaiveDate,
) -> Result<(), ValidationFailure> {
    let mut errors = Vec::new();

    for (idx, record) in records.iter().enumerate() {
        if let Some(message) = validate_record(record, schema, today) {
            errors.push(RowValidationError {
                row: idx + 1,
                message,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        debug!(failing_rows = errors.len(), "preview validation failed");
        Err(ValidationFailure { errors })
    }
}

/// Checks one record, returning the first failure found.
fn validate_record(
    record: &PreviewRecord,
    schema: &TargetSchema,
    today: NaiveDate,
) -> Option<String> {
    for field in schema.fields() {
        if let Some(message) = validate_field(record, field, today) {
            return Some(message);
        }
    }

    for rule in schema.rules() {
        if let Some(message) = validate_rule(record, rule, schema) {
            return Some(message);
        }
    }

    None
}

fn validate_field(record: &PreviewRecord, field: &FieldSpec, today: NaiveDate) -> Option<String> {
    let value = record.get(&field.key).unwrap_or("").trim();

    if value.is_empty() {
        if field.optional {
            return None;
        }
        return Some(format!("Missing {}", lowercased(&field.label)));
    }

    match &field.kind {
        FieldKind::Text | FieldKind::Tags => None,
        FieldKind::Date(rule) => match parse_dmy(value) {
            Some(date) if within_statutory_range(date, today, rule) => None,
            _ => Some(format!("Invalid {}", lowercased(&field.label))),
        },
        FieldKind::Number(rule) => match value.parse::<f64>() {
            Ok(number) if rule.contains(number) => None,
            _ => Some(format!(
                "{} must be between {} and {}",
                sentence_cased(&field.label),
                rule.min,
                rule.max
            )),
        },
        FieldKind::Boolean => {
            if value == "true" || value == "false" {
                None
            } else {
                Some(format!(
                    "{} must be 'true' or 'false'",
                    sentence_cased(&field.label)
                ))
            }
        }
    }
}

/// Evaluates a cross-field rule; rules only fire when the dates they
/// reference are present and parse.
fn validate_rule(
    record: &PreviewRecord,
    rule: &CrossFieldRule,
    schema: &TargetSchema,
) -> Option<String> {
    match rule {
        CrossFieldRule::DateOrder { earlier, later } => {
            let first = parse_field_date(record, earlier)?;
            let second = parse_field_date(record, later)?;
            if second < first {
                Some(format!(
                    "{} cannot be before {}",
                    sentence_cased(schema.label_for(later)),
                    lowercased(schema.label_for(earlier))
                ))
            } else {
                None
            }
        }
        CrossFieldRule::MinimumAgeAt {
            birth,
            event,
            years,
        } => {
            let born = parse_field_date(record, birth)?;
            let happened = parse_field_date(record, event)?;
            let threshold = add_years(born, u32::try_from(*years).unwrap_or(0))?;
            if happened < threshold {
                Some(format!(
                    "{} requires a minimum age of {years} years",
                    sentence_cased(schema.label_for(event))
                ))
            } else {
                None
            }
        }
    }
}

fn parse_field_date(record: &PreviewRecord, key: &str) -> Option<NaiveDate> {
    let value = record.get(key)?.trim();
    if value.is_empty() {
        return None;
    }
    parse_dmy(value)
}

fn lowercased(label: &str) -> String {
    label.to_lowercase()
}

/// Lowercases a label, then capitalizes its first character, turning
/// "Registration Date" into "Registration date".
fn sentence_cased(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => lower,
    }
}
