//! # tablegen CLI
//!
//! Command-line interface for tablegen.
//!
//! ## Commands
//!
//! - `generate` - Load a schema document and write models and SQL scripts
//! - `check` - Load and validate a schema document, report its tables
//! - `types` - List the supported storage types
//!

pub mod commands;
pub mod config;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tablegen_codegen::ModelTarget;

pub use config::{DEFAULT_SETTINGS_FILE, Settings};

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Parser)]
#[command(name = "tablegen")]
#[command(author, version, about = "Generate ORM models and MySQL scripts from a JSON table schema", long_about = None)]
pub struct Cli {
    /// Settings file (defaults to ./tablegen.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is unset
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate model files and SQL scripts
    Generate(GenerateArgs),

    /// Validate a schema document without writing anything
    Check(InputArgs),

    /// List supported storage types and their model types
    Types,
}

#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Schema document [default: config.json]
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Base directory the model and SQL directories are resolved against
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Model directory [default: ../../models]
    #[arg(long, value_name = "DIR")]
    pub model_dir: Option<PathBuf>,

    /// SQL directory [default: ../../sql]
    #[arg(long, value_name = "DIR")]
    pub sql_dir: Option<PathBuf>,

    /// Model language: rust or go [default: rust]
    #[arg(short, long)]
    pub target: Option<ModelTarget>,

    /// Go package name [default: models]
    #[arg(long)]
    pub package: Option<String>,

    /// Registration function called for every model
    #[arg(long)]
    pub registrar: Option<String>,

    /// Render and report without writing files
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    /// Flags as a settings overlay
    pub fn to_settings(&self) -> Settings {
        Settings {
            input: self.input.input.clone(),
            output_dir: self.output_dir.clone(),
            model_dir: self.model_dir.clone(),
            sql_dir: self.sql_dir.clone(),
            target: self.target,
            package: self.package.clone(),
            registrar: self.registrar.clone(),
            ..Default::default()
        }
    }
}

impl InputArgs {
    /// Flags as a settings overlay
    pub fn to_settings(&self) -> Settings {
        Settings {
            input: self.input.clone(),
            ..Default::default()
        }
    }
}

/// Execute a parsed command line
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::discover(cli.config.as_deref())?;

    match &cli.command {
        Commands::Generate(args) => {
            commands::generate(&settings.merge(args.to_settings()), args.dry_run)
        }
        Commands::Check(args) => commands::check(&settings.merge(args.to_settings())),
        Commands::Types => {
            commands::types();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "tablegen", "generate", "-i", "schema.json", "--target", "go", "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.input.input, Some(PathBuf::from("schema.json")));
                assert_eq!(args.target, Some(ModelTarget::Go));
                assert!(args.dry_run);
            }
            other => panic!("expected generate, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_target() {
        assert!(Cli::try_parse_from(["tablegen", "generate", "--target", "cobol"]).is_err());
    }

    #[test]
    fn test_log_filter() {
        let cli = Cli::try_parse_from(["tablegen", "types"]).unwrap();
        assert_eq!(cli.log_filter(), "info");

        let cli = Cli::try_parse_from(["tablegen", "-vv", "types"]).unwrap();
        assert_eq!(cli.log_filter(), "trace");

        let cli = Cli::try_parse_from(["tablegen", "types", "-q"]).unwrap();
        assert_eq!(cli.log_filter(), "error");
    }

    #[test]
    fn test_generate_flags_override_settings() {
        let file = Settings {
            package: Some("db".into()),
            sql_dir: Some("from_file".into()),
            ..Default::default()
        };
        let args = GenerateArgs {
            sql_dir: Some("from_flag".into()),
            ..Default::default()
        };

        let merged = file.merge(args.to_settings());
        assert_eq!(merged.sql_dir, Some(PathBuf::from("from_flag")));
        assert_eq!(merged.package.as_deref(), Some("db"));
    }
}
