//! Error types for tablegen
//!
//! Every failure in the pipeline is either a parse error (the schema document
//! is malformed or uses something the generator does not support) or an IO
//! error (the document cannot be read, or an artifact cannot be written).
//! Both are fatal: callers propagate them to the binary, which reports the
//! diagnostic and exits non-zero.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for tablegen
#[derive(Debug, Error)]
pub enum EngineError {
    // ========================================================================
    // Parse Errors
    // ========================================================================
    /// Storage type not present in the type map
    #[error("Unsupported storage type '{storage_type}' for column '{table}.{column}'")]
    UnsupportedType {
        table: String,
        column: String,
        storage_type: String,
    },

    /// Storage type lookup outside of any column context
    #[error("Unsupported storage type '{0}'")]
    UnknownStorageType(String),

    /// Column declared without a `type` attribute
    #[error("Column '{table}.{column}' has no type")]
    MissingType { table: String, column: String },

    /// Attribute value has the wrong primitive kind
    #[error("Failed to parse {attribute} of '{owner}': expected {expected}, found {found}")]
    AttributeType {
        owner: String,
        attribute: String,
        expected: &'static str,
        found: String,
    },

    /// Character column without a usable size
    #[error("Column '{table}.{column}' of type {storage_type} requires a positive size")]
    MissingSize {
        table: String,
        column: String,
        storage_type: String,
    },

    /// `index` entry not shaped as a list of lists of column names
    #[error("Malformed index definition on table '{table}': {message}")]
    MalformedIndex { table: String, message: String },

    /// Top-level document, table or column entry is not a mapping
    #[error("Malformed schema document: {0}")]
    MalformedDocument(String),

    /// Table breaks a structural invariant (no columns, empty names, ...)
    #[error("Invalid table '{table}': {message}")]
    InvalidTable { table: String, message: String },

    /// The document is not valid JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// Schema document not found
    #[error("Schema document not found at path: {0}")]
    SchemaNotFound(PathBuf),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Invalid generator configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    /// Create an attribute kind mismatch error
    pub fn attribute_type(
        owner: impl Into<String>,
        attribute: impl Into<String>,
        expected: &'static str,
        found: impl std::fmt::Display,
    ) -> Self {
        EngineError::AttributeType {
            owner: owner.into(),
            attribute: attribute.into(),
            expected,
            found: found.to_string(),
        }
    }

    /// Create a malformed index error
    pub fn malformed_index(table: impl Into<String>, msg: impl Into<String>) -> Self {
        EngineError::MalformedIndex {
            table: table.into(),
            message: msg.into(),
        }
    }

    /// Create a malformed document error
    pub fn malformed(msg: impl Into<String>) -> Self {
        EngineError::MalformedDocument(msg.into())
    }

    /// Create an invalid table error
    pub fn invalid_table(table: impl Into<String>, msg: impl Into<String>) -> Self {
        EngineError::InvalidTable {
            table: table.into(),
            message: msg.into(),
        }
    }

    /// Check if this error came from parsing the schema document
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            EngineError::UnsupportedType { .. }
                | EngineError::UnknownStorageType(_)
                | EngineError::MissingType { .. }
                | EngineError::AttributeType { .. }
                | EngineError::MissingSize { .. }
                | EngineError::MalformedIndex { .. }
                | EngineError::MalformedDocument(_)
                | EngineError::InvalidTable { .. }
                | EngineError::Json(_)
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            EngineError::SchemaNotFound(_)
                | EngineError::FileRead { .. }
                | EngineError::FileWrite { .. }
                | EngineError::DirectoryCreate { .. }
        )
    }
}

/// Result type alias using EngineError
pub type EngineResult<T> = Result<T, EngineError>;

// ============================================================================
// Tests
// ============================================================================
