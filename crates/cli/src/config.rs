//! Settings file (`tablegen.toml`)
//!
//! Every key is optional. Values given on the command line win over the
//! settings file, which wins over the built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tablegen_codegen::{GeneratorConfig, ModelTarget};
use tablegen_ir::DEFAULT_SCHEMA_FILE;

/// File looked up in the working directory when `--config` is not given
pub const DEFAULT_SETTINGS_FILE: &str = "tablegen.toml";

/// Contents of `tablegen.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Schema document
    pub input: Option<PathBuf>,

    /// Base directory for the model and SQL directories
    pub output_dir: Option<PathBuf>,

    /// Directory for model files
    pub model_dir: Option<PathBuf>,

    /// Directory for SQL scripts
    pub sql_dir: Option<PathBuf>,

    /// Model language
    pub target: Option<ModelTarget>,

    /// Go package name
    pub package: Option<String>,

    /// Rust ORM crate path
    pub orm_crate: Option<String>,

    /// Registration function
    pub registrar: Option<String>,

    /// Go import path of the registrar
    pub registrar_import: Option<String>,
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid settings")
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Load the explicit settings file, or `tablegen.toml` from the working
    /// directory when present, or fall back to defaults.
    pub fn discover(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(DEFAULT_SETTINGS_FILE);
                if path.is_file() {
                    tracing::debug!(path = %path.display(), "using settings file");
                    Self::load(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Overlay `other` on top of `self`; keys set in `other` win
    pub fn merge(self, other: Settings) -> Settings {
        Settings {
            input: other.input.or(self.input),
            output_dir: other.output_dir.or(self.output_dir),
            model_dir: other.model_dir.or(self.model_dir),
            sql_dir: other.sql_dir.or(self.sql_dir),
            target: other.target.or(self.target),
            package: other.package.or(self.package),
            orm_crate: other.orm_crate.or(self.orm_crate),
            registrar: other.registrar.or(self.registrar),
            registrar_import: other.registrar_import.or(self.registrar_import),
        }
    }

    /// Schema document path, defaulting to `config.json`
    pub fn input_path(&self) -> PathBuf {
        self.input
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCHEMA_FILE))
    }

    /// Build the generator configuration, filling gaps with defaults
    pub fn generator_config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::new();

        if let Some(dir) = &self.output_dir {
            config = config.with_output_dir(dir);
        }
        if let Some(dir) = &self.model_dir {
            config = config.with_model_dir(dir);
        }
        if let Some(dir) = &self.sql_dir {
            config = config.with_sql_dir(dir);
        }
        if let Some(target) = self.target {
            config = config.with_target(target);
        }
        if let Some(package) = &self.package {
            config = config.with_package(package);
        }
        if let Some(orm_crate) = &self.orm_crate {
            config = config.with_orm_crate(orm_crate);
        }
        if let Some(registrar) = &self.registrar {
            config = config.with_registrar(registrar);
        }
        if let Some(import) = &self.registrar_import {
            config = config.with_registrar_import(import);
        }

        config
    }
}
