//! Error types for record hydration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building schemas or hydrating records.
#[derive(Debug, Error)]
pub enum HydrateError {
    // === Schema Errors ===
    /// Two fields of the same type share a canonical name.
    #[error("field '{field}' is declared more than once on {type_name}")]
    DuplicateField { type_name: String, field: String },

    /// A field name or alias is empty.
    #[error("empty field name or alias on {type_name}")]
    EmptyFieldName { type_name: String },

    /// The same alias is claimed by two different fields.
    #[error("alias '{alias}' on {type_name} is claimed by both '{first}' and '{second}'")]
    AliasConflict {
        type_name: String,
        alias: String,
        first: String,
        second: String,
    },

    /// No parser is registered for the declared value type of a field.
    #[error("no parser registered for value type '{value_type}' of field '{field}'")]
    UnknownValueType { field: String, value_type: String },

    // === Data Errors ===
    /// A raw value could not be coerced into the field's value type.
    #[error(
        "line {line}, column '{column}': cannot parse '{value}' as {value_type} for field '{field}': {message}"
    )]
    Parse {
        line: usize,
        column: String,
        field: String,
        value: String,
        value_type: String,
        message: String,
    },

    /// A data row does not have as many values as the header has columns.
    #[error("line {line} has {actual} values but the header has {expected} columns")]
    ShapeMismatch {
        line: usize,
        expected: usize,
        actual: usize,
    },

    // === Input Errors ===
    /// The line source produced no header line.
    #[error("no header line in {path}")]
    MissingHeader { path: PathBuf },

    /// The configured delimiter is the empty string.
    #[error("delimiter must not be empty")]
    EmptyDelimiter,

    // === File System Errors ===
    /// The input could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line could not be read from the input.
    #[error("failed to read line {line} of {path}: {source}")]
    Read {
        path: PathBuf,
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

impl HydrateError {
    /// Returns true for errors raised while building a schema, before any data is read.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateField { .. }
                | Self::EmptyFieldName { .. }
                | Self::AliasConflict { .. }
                | Self::UnknownValueType { .. }
        )
    }
}

/// Result type for hydration operations.
pub type Result<T> = std::result::Result<T, HydrateError>;
