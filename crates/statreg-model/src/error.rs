//! Error types for schema construction.

use thiserror::Error;

/// Errors raised when assembling a target schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two fields share the same key.
    #[error("duplicate field key '{key}' in schema '{entity}'")]
    DuplicateKey { entity: String, key: String },

    /// A schema must describe at least one field.
    #[error("schema '{entity}' has no fields")]
    Empty { entity: String },

    /// A cross-field rule references a key that is not in the schema.
    #[error("rule references unknown field '{key}' in schema '{entity}'")]
    UnknownRuleField { entity: String, key: String },
}
