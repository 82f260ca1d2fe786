//! Schema Error Types

use crate::field::{FeatureKind, Field};
use thiserror::Error;

/// Errors reconciling a model schema with the collected and default fields
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// Schema lists no columns
    #[error("Schema has no columns")]
    Empty,

    /// Same column name listed twice
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// Column name does not resolve to a known field
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Two columns resolve to the same field (e.g. a name and its alias)
    #[error("Columns '{first}' and '{second}' both map to field {field}")]
    DuplicateField {
        field: Field,
        first: String,
        second: String,
    },

    /// Declared column kind disagrees with the field kind
    #[error("Column '{column}' is declared {declared}, but {field} is {expected}")]
    ColumnKindMismatch {
        column: String,
        field: Field,
        declared: FeatureKind,
        expected: FeatureKind,
    },

    /// Column is neither collected from the user nor defaulted
    #[error("Column '{column}' ({field}) is neither collected from the user nor covered by a default")]
    UncoveredColumn { column: String, field: Field },

    /// Default value has the wrong kind
    #[error("Default for {field} must be {expected}, got {actual}")]
    DefaultKindMismatch {
        field: Field,
        expected: FeatureKind,
        actual: FeatureKind,
    },

    /// Exposed field was not supplied
    #[error("Missing input for {0}")]
    MissingInput(Field),

    /// Supplied value has the wrong kind
    #[error("Input for {field} must be {expected}, got {actual}")]
    InputKindMismatch {
        field: Field,
        expected: FeatureKind,
        actual: FeatureKind,
    },
}
