//! # Model Generation
//!
//! Generates one record type per table plus a registration file that hands
//! every type to the persistence layer, in schema order.
//!
//! ## Targets
//!
//! - [`ModelTarget::Rust`]: `{table}.rs` structs with `#[orm(...)]` field
//!   attributes, registered from `mod.rs`
//! - [`ModelTarget::Go`]: `{table}.go` structs with `orm:"..."` tags,
//!   registered from `common.go`
//!
//! Only the first primary-key column (in column order) is annotated as the
//! model key. Further primary-key columns become ordinary fields.

pub mod go;
pub mod rust;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use tablegen_core::{EngineError, EngineResult};
use tablegen_ir::{ColumnSpec, Schema, TableSpec};

use crate::{GeneratedFile, GeneratorConfig};

// ============================================================================
// ModelTarget
// ============================================================================

/// Language the models are generated in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTarget {
    #[default]
    Rust,
    Go,
}

impl ModelTarget {
    /// File extension of model files
    pub fn extension(&self) -> &'static str {
        match self {
            ModelTarget::Rust => "rs",
            ModelTarget::Go => "go",
        }
    }

    /// Name of the registration file
    pub fn registration_file(&self) -> &'static str {
        match self {
            ModelTarget::Rust => "mod.rs",
            ModelTarget::Go => "common.go",
        }
    }

    /// Registration function used when none is configured
    pub fn default_registrar(&self) -> &'static str {
        match self {
            ModelTarget::Rust => "orm::register",
            ModelTarget::Go => "common.DB_REGISTER_MODELS",
        }
    }

    /// Get all targets
    pub fn all() -> &'static [ModelTarget] {
        &[ModelTarget::Rust, ModelTarget::Go]
    }
}

impl fmt::Display for ModelTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelTarget::Rust => write!(f, "rust"),
            ModelTarget::Go => write!(f, "go"),
        }
    }
}

impl FromStr for ModelTarget {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rust" | "rs" => Ok(ModelTarget::Rust),
            "go" | "golang" => Ok(ModelTarget::Go),
            other => Err(EngineError::InvalidConfig(format!(
                "unknown model target '{other}' (expected 'rust' or 'go')"
            ))),
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Generate every model file followed by the registration file.
pub fn generate_models(schema: &Schema, config: &GeneratorConfig) -> Vec<GeneratedFile> {
    let mut files = Vec::with_capacity(schema.table_count() + 1);

    for table in schema.tables() {
        let path = config
            .model_dir
            .join(format!("{}.{}", table.name, config.target.extension()));
        let content = render_model(table, config);

        files.push(match config.target {
            ModelTarget::Rust => GeneratedFile::rust(path, content),
            ModelTarget::Go => GeneratedFile::go(path, content),
        });
    }

    files.push(generate_registration(schema, config));
    files
}

/// Render the model source for one table
pub fn render_model(table: &TableSpec, config: &GeneratorConfig) -> String {
    match config.target {
        ModelTarget::Rust => rust::render_model(table, config),
        ModelTarget::Go => go::render_model(table, config),
    }
}

/// Registration file covering every table of the schema
pub fn generate_registration(schema: &Schema, config: &GeneratorConfig) -> GeneratedFile {
    let path = config.model_dir.join(config.target.registration_file());

    match config.target {
        ModelTarget::Rust => GeneratedFile::rust(path, rust::render_registration(schema, config)),
        ModelTarget::Go => GeneratedFile::go(path, go::render_registration(schema, config)),
    }
}

/// Primary-key columns that do not receive the model key annotation
pub fn demoted_primary_keys(table: &TableSpec) -> Vec<&ColumnSpec> {
    table.primary_keys().into_iter().skip(1).collect()
}

/// Pair every column with whether it carries the model key annotation
pub(crate) fn fields_with_key(table: &TableSpec) -> impl Iterator<Item = (&ColumnSpec, bool)> {
    let key = table.model_primary_key().map(|c| c.name.as_str());
    table
        .columns
        .iter()
        .map(move |c| (c, Some(c.name.as_str()) == key))
}

// ============================================================================
// Tests
// ============================================================================
