//! Shared data model for the statutory register import pipeline.
//!
//! The types here are consumed by every other crate in the workspace:
//! target schemas describing what an import must populate, column
//! mappings and confidence scores produced during the mapping step,
//! preview records and row-level validation errors, and the observed
//! state of a backend import job.

pub mod error;
pub mod file;
pub mod job;
pub mod mapping;
pub mod record;
pub mod registers;
pub mod schema;

pub use error::SchemaError;
pub use file::ImportFile;
pub use job::{ImportJob, JobState};
pub use mapping::{ColumnMapping, ConfidenceScore};
pub use record::{PreviewRecord, RowValidationError, ValidationFailure, split_tags};
pub use schema::{CrossFieldRule, DateRule, FieldKind, FieldSpec, NumberRule, TargetSchema};
