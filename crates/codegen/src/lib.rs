//! # tablegen Codegen
//!
//! Generation engine for tablegen.
//!
//! This crate turns a loaded [`Schema`] into the files a project needs:
//!
//! ## Features
//!
//! - **Model Generation**: one record type per table with ORM annotations,
//!   plus a registration file (Rust or Go)
//! - **SQL Generation**: MySQL create / alter / drop-column / add-column
//!   scripts covering every table
//!

// ============================================================================
// Modules
// ============================================================================

pub mod generator;
pub mod migrations;
pub mod models;

// ============================================================================
// Re-exports
// ============================================================================

pub use generator::{GenerationSummary, Generator, generate, summarize};
pub use models::ModelTarget;

use std::path::{Path, PathBuf};
use tablegen_core::{EngineError, EngineResult};

// ============================================================================
// GeneratorConfig
// ============================================================================

/// Default directory for generated model files
pub const DEFAULT_MODEL_DIR: &str = "../../models";

/// Default directory for generated SQL scripts
pub const DEFAULT_SQL_DIR: &str = "../../sql";

/// Configuration for the code generator
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Base directory the model and SQL directories are resolved against
    pub output_dir: PathBuf,

    /// Directory for model files, relative to `output_dir`
    pub model_dir: PathBuf,

    /// Directory for SQL scripts, relative to `output_dir`
    pub sql_dir: PathBuf,

    /// Language of the generated models
    pub target: ModelTarget,

    /// Package (Go) the models are generated into
    pub package: String,

    /// Path of the ORM crate (Rust) providing the `Model` derive
    pub orm_crate: String,

    /// Function called once per model in the registration file;
    /// `None` selects the target's default
    pub registrar: Option<String>,

    /// Import path of the registrar (Go); `None` uses the registrar's
    /// package qualifier
    pub registrar_import: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            sql_dir: PathBuf::from(DEFAULT_SQL_DIR),
            target: ModelTarget::default(),
            package: "models".to_string(),
            orm_crate: "orm".to_string(),
            registrar: None,
            registrar_import: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the model directory
    pub fn with_model_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.model_dir = dir.into();
        self
    }

    /// Set the SQL directory
    pub fn with_sql_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.sql_dir = dir.into();
        self
    }

    /// Select the model language
    pub fn with_target(mut self, target: ModelTarget) -> Self {
        self.target = target;
        self
    }

    /// Set the Go package name
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Set the Rust ORM crate path
    pub fn with_orm_crate(mut self, orm_crate: impl Into<String>) -> Self {
        self.orm_crate = orm_crate.into();
        self
    }

    /// Set the registration function
    pub fn with_registrar(mut self, registrar: impl Into<String>) -> Self {
        self.registrar = Some(registrar.into());
        self
    }

    /// Set the registrar import path (Go)
    pub fn with_registrar_import(mut self, import: impl Into<String>) -> Self {
        self.registrar_import = Some(import.into());
        self
    }

    /// Registration function, falling back to the target default
    pub fn registrar(&self) -> String {
        self.registrar
            .clone()
            .unwrap_or_else(|| self.target.default_registrar().to_string())
    }

    /// Check that names end up as usable identifiers in generated code
    pub fn validate(&self) -> EngineResult<()> {
        if self.package.is_empty() {
            return Err(EngineError::InvalidConfig("package name cannot be empty".into()));
        }
        if self.orm_crate.is_empty() {
            return Err(EngineError::InvalidConfig("ORM crate path cannot be empty".into()));
        }
        if self.registrar().is_empty() {
            return Err(EngineError::InvalidConfig("registrar cannot be empty".into()));
        }
        Ok(())
    }
}

// ============================================================================
// GeneratedFile
// ============================================================================

/// Represents a single generated file
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// Path relative to the output directory
    pub path: PathBuf,

    /// File content
    pub content: String,

    /// File type for categorization
    pub file_type: FileType,
}

impl GeneratedFile {
    /// Create a new generated file
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>, file_type: FileType) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            file_type,
        }
    }

    /// Create a Rust source file
    pub fn rust(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileType::Rust)
    }

    /// Create a Go source file
    pub fn go(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileType::Go)
    }

    /// Create a SQL script
    pub fn sql(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileType::Sql)
    }

    /// Get the file extension
    pub fn extension(&self) -> &str {
        self.file_type.extension()
    }
}

/// Type of generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Rust,
    Go,
    Sql,
}

impl FileType {
    /// Get the file extension for this type
    pub fn extension(&self) -> &str {
        match self {
            FileType::Rust => "rs",
            FileType::Go => "go",
            FileType::Sql => "sql",
        }
    }

    /// Whether this file holds model source code
    pub fn is_model(&self) -> bool {
        matches!(self, FileType::Rust | FileType::Go)
    }
}

// ============================================================================
// GeneratedProject
// ============================================================================

/// Collection of all files generated for a schema
#[derive(Debug, Clone, Default)]
pub struct GeneratedProject {
    /// Number of tables the files were generated from
    pub table_count: usize,

    /// All generated files
    pub files: Vec<GeneratedFile>,

    /// Warnings collected during generation
    pub warnings: Vec<String>,
}

impl GeneratedProject {
    /// Create a new, empty project for the given number of tables
    pub fn new(table_count: usize) -> Self {
        Self {
            table_count,
            files: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add a file to the project
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Get the number of files
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Get files by type
    pub fn files_by_type(&self, file_type: FileType) -> Vec<&GeneratedFile> {
        self.files
            .iter()
            .filter(|f| f.file_type == file_type)
            .collect()
    }

    /// Find a file by its path
    pub fn file(&self, path: impl AsRef<Path>) -> Option<&GeneratedFile> {
        let path = path.as_ref();
        self.files.iter().find(|f| f.path == path)
    }

    /// Write all files to disk, replacing existing ones
    pub fn write_to_disk(&self, base_dir: impl AsRef<Path>) -> EngineResult<()> {
        let base_dir = base_dir.as_ref();

        for file in &self.files {
            let full_path = base_dir.join(&file.path);

            // Create parent directories
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| EngineError::DirectoryCreate {
                    path: parent.to_path_buf(),
                    message: e.to_string(),
                })?;
            }

            std::fs::write(&full_path, &file.content).map_err(|e| EngineError::FileWrite {
                path: full_path.clone(),
                message: e.to_string(),
            })?;

            tracing::debug!(
                path = %full_path.display(),
                bytes = file.content.len(),
                "file written"
            );
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generator_config_default() {
        let config = GeneratorConfig::default();
        assert_eq!(config.model_dir, PathBuf::from("../../models"));
        assert_eq!(config.sql_dir, PathBuf::from("../../sql"));
        assert_eq!(config.target, ModelTarget::Rust);
        assert_eq!(config.package, "models");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generator_config_builder() {
        let config = GeneratorConfig::new()
            .with_output_dir("/tmp/output")
            .with_model_dir("models")
            .with_sql_dir("sql")
            .with_target(ModelTarget::Go)
            .with_package("db")
            .with_registrar("orm.RegisterModel");

        assert_eq!(config.output_dir, PathBuf::from("/tmp/output"));
        assert_eq!(config.model_dir, PathBuf::from("models"));
        assert_eq!(config.target, ModelTarget::Go);
        assert_eq!(config.package, "db");
        assert_eq!(config.registrar(), "orm.RegisterModel");
    }

    #[test]
    fn test_registrar_defaults_per_target() {
        let rust = GeneratorConfig::new();
        let go = GeneratorConfig::new().with_target(ModelTarget::Go);
        assert_eq!(rust.registrar(), ModelTarget::Rust.default_registrar());
        assert_eq!(go.registrar(), ModelTarget::Go.default_registrar());
    }

    #[test]
    fn test_config_validation() {
        assert!(GeneratorConfig::new().with_package("").validate().is_err());
        assert!(GeneratorConfig::new().with_orm_crate("").validate().is_err());
        assert!(GeneratorConfig::new().with_registrar("").validate().is_err());
    }

    #[test]
    fn test_generated_file() {
        let file = GeneratedFile::sql("sql/a.sql", "SELECT 1;");
        assert_eq!(file.extension(), "sql");
        assert!(!file.file_type.is_model());
        assert!(GeneratedFile::go("m/a.go", "").file_type.is_model());
    }

    #[test]
    fn test_generated_project() {
        let mut project = GeneratedProject::new(1);
        project.add_file(GeneratedFile::rust("models/users.rs", "pub struct User;"));
        project.add_file(GeneratedFile::sql("sql/create.sql", ""));

        assert_eq!(project.file_count(), 2);
        assert_eq!(project.files_by_type(FileType::Rust).len(), 1);
        assert!(project.file("sql/create.sql").is_some());
        assert!(!project.has_warnings());
    }

    #[test]
    fn test_write_to_disk() {
        let temp_dir = TempDir::new().unwrap();

        let mut project = GeneratedProject::new(1);
        project.add_file(GeneratedFile::rust("models/users.rs", "pub struct User;\n"));
        project.add_file(GeneratedFile::sql("sql/create.sql", "CREATE TABLE t;\n"));
        project.write_to_disk(temp_dir.path()).unwrap();

        let model = std::fs::read_to_string(temp_dir.path().join("models/users.rs")).unwrap();
        assert_eq!(model, "pub struct User;\n");
        assert!(temp_dir.path().join("sql/create.sql").exists());

        // A second run overwrites
        project.files[0].content = "pub struct Other;\n".to_string();
        project.write_to_disk(temp_dir.path()).unwrap();
        let model = std::fs::read_to_string(temp_dir.path().join("models/users.rs")).unwrap();
        assert_eq!(model, "pub struct Other;\n");
    }

    #[test]
    fn test_write_to_disk_reports_directory_failure() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("models");
        std::fs::write(&blocker, "not a directory").unwrap();

        let mut project = GeneratedProject::new(1);
        project.add_file(GeneratedFile::rust("models/users.rs", ""));

        let err = project.write_to_disk(temp_dir.path()).unwrap_err();
        assert!(err.is_io());
    }
}
