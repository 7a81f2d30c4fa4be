//! Command implementations

use anyhow::Context;
use colored::Colorize;
use tablegen_codegen::{GeneratedProject, Generator, summarize};
use tablegen_core::TypeMap;
use tablegen_ir::{Schema, TableSpec, load_schema};

use crate::config::Settings;

/// `tablegen generate`
pub fn generate(settings: &Settings, dry_run: bool) -> anyhow::Result<()> {
    let schema = load(settings)?;
    let generator = Generator::new(settings.generator_config());

    let output = if dry_run {
        generator.generate(&schema)?
    } else {
        generator
            .generate_and_write(&schema)
            .with_context(|| {
                format!(
                    "failed to write output below {}",
                    generator.config().output_dir.display()
                )
            })?
    };

    print_warnings(&output);
    print!("{}", summarize(&output));

    if dry_run {
        println!("{}", "Dry run, nothing written:".yellow());
        for file in &output.files {
            println!("  {}", generator.config().output_dir.join(&file.path).display());
        }
    } else {
        println!(
            "{} {} files for {} tables",
            "Generated".green().bold(),
            output.file_count(),
            schema.table_count()
        );
    }

    Ok(())
}

/// `tablegen check`
pub fn check(settings: &Settings) -> anyhow::Result<()> {
    let schema = load(settings)?;

    for table in schema.tables() {
        println!("{}", describe_table(table));
    }

    println!(
        "{} {} tables, {} columns",
        "OK".green().bold(),
        schema.table_count(),
        schema.column_count()
    );
    Ok(())
}

/// `tablegen types`
pub fn types() {
    let type_map = TypeMap::standard();

    let header = format!("{:<20} {:<8} {}", "storage", "rust", "go");
    println!("{}", header.bold());
    for (storage, scalar) in type_map.iter() {
        let storage = if storage.is_character() {
            format!("{}(size)", storage.as_str())
        } else {
            storage.as_str().to_string()
        };
        println!(
            "{:<20} {:<8} {}",
            storage,
            scalar.to_rust_type(),
            scalar.to_go_type()
        );
    }
}

fn load(settings: &Settings) -> anyhow::Result<Schema> {
    let path = settings.input_path();
    let schema = load_schema(&path, &TypeMap::standard())
        .with_context(|| format!("failed to load schema {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        tables = schema.table_count(),
        columns = schema.column_count(),
        "schema loaded",
    );
    Ok(schema)
}

/// One-line report for a table
pub fn describe_table(table: &TableSpec) -> String {
    let keys: Vec<&str> = table
        .primary_keys()
        .into_iter()
        .map(|c| c.name.as_str())
        .collect();
    let keys = if keys.is_empty() {
        "none".to_string()
    } else {
        keys.join(", ")
    };

    format!(
        "{} ({}): {} columns, primary key: {}, {} indexes",
        table.name,
        table.model_name,
        table.column_count(),
        keys,
        table.indexes.len()
    )
}

fn print_warnings(output: &GeneratedProject) {
    for warning in &output.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tablegen_core::{ScalarType, StorageType};
    use tablegen_ir::{ColumnSpec, IndexSpec};
    use tempfile::TempDir;

    const USERS: &str = r#"{
        "users": {
            "model_name": "User",
            "id": {"type": "bigint", "pk": true, "sn": 1},
            "name": {"type": "varchar", "size": 32, "sn": 2}
        }
    }"#;

    #[test]
    fn test_describe_table() {
        let table = TableSpec::new("users")
            .with_column(ColumnSpec::new("id", StorageType::BigInt, ScalarType::I64).primary_key())
            .with_index(IndexSpec::new(["id"]));

        assert_eq!(
            describe_table(&table),
            "users (Users): 1 columns, primary key: id, 1 indexes"
        );
    }

    #[test]
    fn test_generate_writes_files() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("config.json");
        std::fs::write(&input, USERS).unwrap();

        let settings = Settings {
            input: Some(input),
            output_dir: Some(temp_dir.path().to_path_buf()),
            model_dir: Some(PathBuf::from("models")),
            sql_dir: Some(PathBuf::from("sql")),
            ..Default::default()
        };

        generate(&settings, false).unwrap();
        assert!(temp_dir.path().join("models/users.rs").exists());
        assert!(temp_dir.path().join("sql/__all_table_create.sql").exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("config.json");
        std::fs::write(&input, USERS).unwrap();

        let settings = Settings {
            input: Some(input),
            output_dir: Some(temp_dir.path().to_path_buf()),
            model_dir: Some(PathBuf::from("models")),
            ..Default::default()
        };

        generate(&settings, true).unwrap();
        assert!(!temp_dir.path().join("models").exists());
    }

    #[test]
    fn test_check_reports_load_errors() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("config.json");
        std::fs::write(&input, r#"{"t": {"a": {"type": "text"}}}"#).unwrap();

        let settings = Settings {
            input: Some(input),
            ..Default::default()
        };

        let err = check(&settings).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("failed to load schema"));
        assert!(message.contains("text"));
    }
}
