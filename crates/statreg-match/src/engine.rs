//! Automatic column mapping across a file's headers.

use tracing::debug;

use statreg_model::{ColumnMapping, ConfidenceScore, TargetSchema};

use crate::similarity::similarity;

/// Minimum similarity a header must *strictly* exceed to be auto-mapped.
pub const AUTO_MAP_THRESHOLD: f64 = 0.5;

/// The initial mapping and per-field confidence produced by a pass of
/// the auto-mapper.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutoMapOutcome {
    /// Field key to header assignments that cleared the threshold.
    pub mapping: ColumnMapping,
    /// Similarity score for each assigned field.
    pub confidence: ConfidenceScore,
}

/// Matches every target field against every file header and keeps the
/// best-scoring header per field.
///
/// A field is assigned only when its best score strictly exceeds
/// [`AUTO_MAP_THRESHOLD`]; everything else is left unmapped for the
/// operator. When several headers tie on the maximum score, the first
/// one in file order wins. The pass is deterministic and idempotent for
/// a given `(headers, schema)` pair.
pub fn auto_map(headers: &[String], schema: &TargetSchema) -> AutoMapOutcome {
    let mut outcome = AutoMapOutcome::default();

    for field in schema.fields() {
        let mut best: Option<(&str, f64)> = None;
        for header in headers {
            let score = similarity(header, &field.label);
            if score > AUTO_MAP_THRESHOLD && best.is_none_or(|(_, top)| score > top) {
                best = Some((header, score));
            }
        }

        if let Some((header, score)) = best {
            debug!(
                field = %field.key,
                header = %header,
                score,
                "auto-mapped column"
            );
            outcome.mapping.set(&field.key, header);
            outcome.confidence.set(&field.key, score);
        }
    }

    outcome
}
