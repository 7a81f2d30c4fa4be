//! # tablegen IR (Intermediate Representation)
//!
//! This crate provides the in-memory representation of a table schema and
//! the loader that builds it from a JSON schema document.
//!
//! ## Core Concepts
//!
//! - **TableSpec**: A database table and the model generated for it
//! - **ColumnSpec**: A column of a table (a field of the model)
//! - **IndexSpec**: A composite index over some of a table's columns
//! - **Schema**: Every table, in document order
//! - **SchemaLoader**: Builds a `Schema` from a parsed document
//!

// Module declarations
pub mod column;
pub mod index;
pub mod loader;
pub mod schema;
pub mod serialization;
pub mod table;

// Re-export commonly used types at crate root
pub use column::{ColumnSpec, DefaultValue};
pub use index::IndexSpec;
pub use loader::{SchemaLoader, keys};
pub use schema::Schema;
pub use serialization::{DEFAULT_SCHEMA_FILE, load_schema, load_schema_from_str, read_document};
pub use table::TableSpec;

// Re-export core types that are commonly used with IR
pub use tablegen_core::{EngineError, EngineResult, ScalarType, StorageType, TypeMap, Validatable};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
