//! # Generator Orchestrator
//!
//! The `Generator` is the top-level entry point for generation. It takes a
//! loaded [`Schema`] and a [`GeneratorConfig`] and delegates to the model
//! and SQL emitters to produce a complete [`GeneratedProject`].
//!
//! ## Pipeline
//!
//! ```text
//! Schema + GeneratorConfig
//!         │
//!         ├──► models::generate_models()         → Vec<GeneratedFile>
//!         ├──► migrations::generate_migrations() → Vec<GeneratedFile>
//!         │
//!         ▼
//!   GeneratedProject { files, warnings }
//! ```
//!
//! Nothing touches the disk until every file has been rendered, so a failed
//! run leaves the output directories as they were.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tablegen_codegen::{Generator, GeneratorConfig};
//! use tablegen_core::TypeMap;
//!
//! let schema = tablegen_ir::load_schema("config.json", &TypeMap::standard())?;
//! let output = Generator::new(GeneratorConfig::default()).generate(&schema)?;
//!
//! println!("Generated {} files", output.file_count());
//! output.write_to_disk(".")?;
//! ```

use tablegen_core::{EngineResult, Validatable};
use tablegen_ir::Schema;

use crate::migrations;
use crate::models;
use crate::{FileType, GeneratedProject, GeneratorConfig};

// ============================================================================
// Generator
// ============================================================================

/// Top-level generator; stateless aside from its configuration.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Create a new generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(GeneratorConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Render every model and SQL file for a schema.
    ///
    /// # Errors
    ///
    /// Returns an `EngineError` if the configuration or the schema is
    /// invalid. Degraded input (extra primary keys, index references to
    /// unknown columns) only produces warnings.
    pub fn generate(&self, schema: &Schema) -> EngineResult<GeneratedProject> {
        self.config.validate()?;
        schema.validate()?;

        let mut output = GeneratedProject::new(schema.table_count());

        for table in schema.tables() {
            let demoted = models::demoted_primary_keys(table);
            if !demoted.is_empty() {
                let names: Vec<&str> = demoted.iter().map(|c| c.name.as_str()).collect();
                tracing::warn!(
                    table = %table.name,
                    key = ?table.model_primary_key().map(|c| c.name.as_str()),
                    demoted = ?names,
                    "multiple primary keys; only the first is annotated in the model",
                );
                output.add_warning(format!(
                    "Table '{}' declares several primary keys; model key is '{}', plain fields: {}",
                    table.name,
                    table.model_primary_key().map(|c| c.name.as_str()).unwrap_or_default(),
                    names.join(", "),
                ));
            }

            let unknown = table.unknown_index_columns();
            if !unknown.is_empty() {
                output.add_warning(format!(
                    "Table '{}' indexes unknown columns: {}",
                    table.name,
                    unknown.join(", "),
                ));
            }
        }

        if schema.is_empty() {
            output.add_warning("Schema declares no tables; only empty scripts are generated");
        }

        for file in models::generate_models(schema, &self.config) {
            output.add_file(file);
        }
        for file in migrations::generate_migrations(schema, &self.config) {
            output.add_file(file);
        }

        tracing::info!(
            tables = schema.table_count(),
            files = output.file_count(),
            warnings = output.warnings.len(),
            target = %self.config.target,
            "generation complete",
        );

        Ok(output)
    }

    /// Generate and write all files under the configured output directory.
    ///
    /// Returns the generated project so callers can inspect warnings and
    /// file counts.
    pub fn generate_and_write(&self, schema: &Schema) -> EngineResult<GeneratedProject> {
        let output = self.generate(schema)?;
        output.write_to_disk(&self.config.output_dir)?;
        tracing::info!(
            output_dir = %self.config.output_dir.display(),
            files = output.file_count(),
            "files written to disk",
        );
        Ok(output)
    }
}

// ============================================================================
// Standalone convenience function
// ============================================================================

/// Shorthand for `Generator::with_defaults().generate(schema)`.
pub fn generate(schema: &Schema) -> EngineResult<GeneratedProject> {
    Generator::with_defaults().generate(schema)
}

// ============================================================================
// GenerationSummary
// ============================================================================

/// A human-readable summary of a completed generation run.
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    /// Number of tables processed.
    pub table_count: usize,
    /// Total number of files generated.
    pub total_files: usize,
    /// Number of model files (including the registration file).
    pub model_files: usize,
    /// Number of SQL scripts.
    pub sql_files: usize,
    /// Number of warnings.
    pub warning_count: usize,
    /// Total bytes of generated content.
    pub total_bytes: usize,
}

impl GenerationSummary {
    /// Build a summary from a generated project.
    pub fn from_project(project: &GeneratedProject) -> Self {
        let model_files = project
            .files
            .iter()
            .filter(|f| f.file_type.is_model())
            .count();

        Self {
            table_count: project.table_count,
            total_files: project.file_count(),
            model_files,
            sql_files: project.files_by_type(FileType::Sql).len(),
            warning_count: project.warnings.len(),
            total_bytes: project.files.iter().map(|f| f.content.len()).sum(),
        }
    }

    /// Format the summary as a human-readable string.
    pub fn display(&self) -> String {
        let mut out = String::with_capacity(512);

        out.push_str("╔══════════════════════════════════════════════════╗\n");
        out.push_str("║         Generation Complete                      ║\n");
        out.push_str("╠══════════════════════════════════════════════════╣\n");
        out.push_str(&format!("║  Tables:      {:<35}║\n", self.table_count));
        out.push_str(&format!("║  Total Files: {:<35}║\n", self.total_files));
        out.push_str(&format!("║    Models:    {:<35}║\n", self.model_files));
        out.push_str(&format!("║    SQL:       {:<35}║\n", self.sql_files));
        out.push_str(&format!("║  Warnings:    {:<35}║\n", self.warning_count));
        out.push_str(&format!("║  Total Size:  {:<35}║\n", format_size(self.total_bytes)));
        out.push_str("╚══════════════════════════════════════════════════╝\n");

        out
    }
}

impl std::fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Produce a [`GenerationSummary`] from a [`GeneratedProject`].
pub fn summarize(project: &GeneratedProject) -> GenerationSummary {
    GenerationSummary::from_project(project)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelTarget;
    use tablegen_core::{ScalarType, StorageType, TypeMap};
    use tablegen_ir::{ColumnSpec, TableSpec, load_schema_from_str};
    use tempfile::TempDir;

    const USERS: &str = r#"{
        "users": {
            "model_name": "User",
            "comment": "user table",
            "name": {"type": "varchar", "size": 32, "sn": 2, "model_name": "Name", "comment": "name"},
            "id": {"type": "bigint", "pk": true, "sn": 1, "model_name": "Id", "comment": "id"}
        }
    }"#;

    fn users_schema() -> Schema {
        load_schema_from_str(USERS, &TypeMap::standard()).unwrap()
    }

    fn config(dir: &TempDir) -> GeneratorConfig {
        GeneratorConfig::new()
            .with_output_dir(dir.path())
            .with_model_dir("models")
            .with_sql_dir("sql")
    }

    #[test]
    fn test_generate_users() {
        let output = generate(&users_schema()).unwrap();

        // users.rs + mod.rs + four scripts
        assert_eq!(output.file_count(), 6);
        assert!(!output.has_warnings());

        let model = output.file("../../models/users.rs").unwrap();
        assert!(model.content.contains("#[orm(column = \"id\", pk)]"));
        let id_at = model.content.find("pub id").unwrap();
        let name_at = model.content.find("pub name").unwrap();
        assert!(id_at < name_at);

        let create = output.file("../../sql/__all_table_create.sql").unwrap();
        assert!(create.content.contains("PRIMARY KEY(`id`)"));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let schema = users_schema();
        let first = generate(&schema).unwrap();
        let second = generate(&schema).unwrap();

        let a: Vec<&str> = first.files.iter().map(|f| f.content.as_str()).collect();
        let b: Vec<&str> = second.files.iter().map(|f| f.content.as_str()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_multiple_primary_keys_warn() {
        let schema = Schema::from(vec![
            TableSpec::new("t")
                .with_column(ColumnSpec::new("a", StorageType::Int, ScalarType::I32).primary_key())
                .with_column(ColumnSpec::new("b", StorageType::Int, ScalarType::I32).primary_key()),
        ]);

        let output = generate(&schema).unwrap();
        assert_eq!(output.warnings.len(), 1);
        assert!(output.warnings[0].contains("model key is 'a'"));
    }

    #[test]
    fn test_invalid_schema_is_rejected() {
        let schema = Schema::from(vec![TableSpec::new("empty")]);
        assert!(generate(&schema).is_err());
    }

    #[test]
    fn test_empty_schema_warns() {
        let output = generate(&Schema::new()).unwrap();
        assert!(output.has_warnings());
        // Registration file plus four empty scripts
        assert_eq!(output.file_count(), 5);
    }

    #[test]
    fn test_generate_and_write() {
        let temp_dir = TempDir::new().unwrap();
        let generator = Generator::new(config(&temp_dir).with_target(ModelTarget::Go));

        generator.generate_and_write(&users_schema()).unwrap();

        assert!(temp_dir.path().join("models/users.go").exists());
        assert!(temp_dir.path().join("models/common.go").exists());
        for name in [
            "__all_table_create.sql",
            "__all_table_field_alter.sql",
            "__all_table_field_drop.sql",
            "__all_table_field_add.sql",
        ] {
            assert!(temp_dir.path().join("sql").join(name).exists(), "{name} missing");
        }
    }

    #[test]
    fn test_invalid_config_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let generator = Generator::new(config(&temp_dir).with_package(""));

        assert!(generator.generate_and_write(&users_schema()).is_err());
        assert!(!temp_dir.path().join("models").exists());
    }

    #[test]
    fn test_generation_summary() {
        let output = generate(&users_schema()).unwrap();
        let summary = summarize(&output);

        assert_eq!(summary.table_count, 1);
        assert_eq!(summary.total_files, 6);
        assert_eq!(summary.model_files, 2);
        assert_eq!(summary.sql_files, 4);
        assert!(summary.total_bytes > 0);

        let display = summary.to_string();
        assert!(display.contains("Generation Complete"));
        assert!(display.contains("Models"));
        assert!(display.contains("SQL"));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
