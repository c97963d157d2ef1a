//! Sample template generation for a target schema.
//!
//! Operators download a template, fill it in, and upload it back; the
//! header row carries the schema's labels so the auto-mapper recognizes
//! every column on the round trip.

use statreg_model::{FieldKind, TargetSchema};

use crate::error::{IngestError, Result};

/// Renders a CSV template for `schema`: the label header row plus one
/// example row illustrating each field's expected format.
pub fn sample_template(schema: &TargetSchema) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(schema.fields().iter().map(|f| f.label.as_str()))?;
    writer.write_record(schema.fields().iter().map(|f| sample_value(&f.kind)))?;

    let bytes = writer
        .into_inner()
        .map_err(|err| IngestError::Template {
            source: err.into_error().into(),
        })?;
    String::from_utf8(bytes).map_err(|_| IngestError::MalformedHeader {
        reason: "generated template was not valid UTF-8".to_string(),
    })
}

fn sample_value(kind: &FieldKind) -> String {
    match kind {
        FieldKind::Text => "Example".to_string(),
        FieldKind::Date(_) => "01/01/2025".to_string(),
        FieldKind::Number(rule) => {
            let midpoint = (rule.min + rule.max) / 2.0;
            if midpoint.fract() == 0.0 {
                format!("{midpoint:.0}")
            } else {
                format!("{midpoint}")
            }
        }
        FieldKind::Boolean => "true".to_string(),
        FieldKind::Tags => "First entry; Second entry".to_string(),
    }
}
