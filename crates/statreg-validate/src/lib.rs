//! Semantic validation of materialized import rows.
//!
//! The preview endpoint turns the uploaded file into structured rows;
//! this crate decides whether those rows are fit to commit: strict
//! `DD/MM/YYYY` date handling, statutory date windows, numeric
//! intervals, boolean literals, and the cross-field rules a schema
//! attaches.

pub mod dates;
pub mod rules;

pub use dates::{add_years, format_dmy, parse_dmy, within_statutory_range};
pub use rules::validate_records;
