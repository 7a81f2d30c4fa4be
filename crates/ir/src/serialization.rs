//! Reading schema documents from disk
//!
//! The document is parsed with `serde_json` in insertion-order mode, so
//! tables and columns are visited in the order they were written.

use std::path::Path;

use serde_json::Value;
use tablegen_core::{EngineError, EngineResult, TypeMap};

use crate::loader::SchemaLoader;
use crate::schema::Schema;

// ============================================================================
// Constants
// ============================================================================

/// Default location of the schema document
pub const DEFAULT_SCHEMA_FILE: &str = "config.json";

// ============================================================================
// Load Functions
// ============================================================================

/// Read and parse a schema document without interpreting it
pub fn read_document(path: impl AsRef<Path>) -> EngineResult<Value> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(EngineError::SchemaNotFound(path.to_path_buf()));
    }

    let json = std::fs::read_to_string(path).map_err(|e| EngineError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(serde_json::from_str(&json)?)
}

/// Load a schema from a file
///
/// # Example
///
/// ```rust,ignore
/// use tablegen_core::TypeMap;
/// use tablegen_ir::load_schema;
///
/// let schema = load_schema("config.json", &TypeMap::standard())?;
/// println!("Loaded {} tables", schema.table_count());
/// ```
pub fn load_schema(path: impl AsRef<Path>, type_map: &TypeMap) -> EngineResult<Schema> {
    let path = path.as_ref();
    let document = read_document(path)?;

    tracing::debug!(path = %path.display(), "schema document read");

    SchemaLoader::new(type_map.clone()).load_value(&document)
}

/// Load a schema from a JSON string
pub fn load_schema_from_str(json: &str, type_map: &TypeMap) -> EngineResult<Schema> {
    SchemaLoader::new(type_map.clone()).load_str(json)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const USERS: &str = r#"{
        "users": {
            "model_name": "User",
            "comment": "user table",
            "id": {"type": "bigint", "pk": true, "sn": 1, "model_name": "Id", "comment": "id"},
            "name": {"type": "varchar", "size": 32, "sn": 2, "model_name": "Name", "comment": "name"}
        }
    }"#;

    #[test]
    fn test_load_schema_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, USERS).unwrap();

        let schema = load_schema(&path, &TypeMap::standard()).unwrap();
        assert_eq!(schema.table_count(), 1);
        assert_eq!(schema.tables()[0].model_name, "User");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_schema("/nonexistent/path/config.json", &TypeMap::standard());

        match result {
            Err(EngineError::SchemaNotFound(path)) => {
                assert!(path.to_string_lossy().contains("nonexistent"));
            }
            other => panic!("Expected SchemaNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_invalid_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{ \"users\": ").unwrap();

        let err = load_schema(&path, &TypeMap::standard()).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_read_document_preserves_key_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"b": {}, "a": {}, "c": {}}"#).unwrap();

        let document = read_document(&path).unwrap();
        let keys: Vec<&String> = document.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_load_schema_from_str() {
        let schema = load_schema_from_str(USERS, &TypeMap::standard()).unwrap();
        assert!(schema.table("users").is_some());
    }
}
