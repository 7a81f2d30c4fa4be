//! Column definitions for table schemas
//!
//! This module contains the `ColumnSpec` struct and the `DefaultValue` type
//! describing one column of a table.

use heck::ToPascalCase;
use serde_json::{Number, Value};
use tablegen_core::{EngineError, EngineResult, ScalarType, StorageType, Validatable};

// ============================================================================
// ColumnSpec
// ============================================================================

/// Represents a column within a table (maps to a model field)
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    /// Storage column name
    pub name: String,

    /// Field name in the generated model
    pub field_name: String,

    /// SQL type of the column
    pub storage_type: StorageType,

    /// Model type of the field, resolved through the type map
    pub scalar_type: ScalarType,

    /// Column size; rendered as `type(size)` for character types
    pub size: u32,

    /// Default value; `None` means no DEFAULT clause
    pub default_value: Option<DefaultValue>,

    /// Whether the column is part of the primary key
    pub is_primary_key: bool,

    /// Whether the column accepts NULL
    pub is_nullable: bool,

    /// Human-readable description
    pub comment: String,

    /// Rendering order within the table (ascending)
    pub sequence_number: i64,
}

impl ColumnSpec {
    /// Create a new non-null column with a field name derived from the
    /// column name (`user_id` → `UserId`)
    pub fn new(
        name: impl Into<String>,
        storage_type: StorageType,
        scalar_type: ScalarType,
    ) -> Self {
        let name = name.into();
        let field_name = default_field_name(&name);

        Self {
            name,
            field_name,
            storage_type,
            scalar_type,
            size: 0,
            default_value: None,
            is_primary_key: false,
            is_nullable: false,
            comment: String::new(),
            sequence_number: 0,
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the model field name
    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = field_name.into();
        self
    }

    /// Set the column size
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set a default value
    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default_value = Some(default);
        self
    }

    /// Mark the column as a primary key
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    /// Mark the column as nullable
    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    /// Set the comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Set the sequence number
    pub fn with_sequence(mut self, sequence_number: i64) -> Self {
        self.sequence_number = sequence_number;
        self
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Whether the column is a character type (`char` / `varchar`)
    pub fn is_character(&self) -> bool {
        self.storage_type.is_character()
    }

    /// Whether a DEFAULT clause should be rendered
    pub fn has_default(&self) -> bool {
        self.default_value.is_some()
    }
}

impl Validatable for ColumnSpec {
    fn validate(&self) -> EngineResult<()> {
        if self.name.is_empty() {
            return Err(EngineError::malformed("column name cannot be empty"));
        }

        if self.field_name.is_empty() {
            return Err(EngineError::malformed(format!(
                "column '{}' has an empty model name",
                self.name
            )));
        }

        Ok(())
    }
}

/// Default model field name for a column
pub fn default_field_name(column: &str) -> String {
    column.to_pascal_case()
}

// ============================================================================
// DefaultValue
// ============================================================================

/// Default value of a column, kept as written in the schema document
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// Boolean value
    Bool(bool),
    /// Numeric value
    Number(Number),
    /// String value
    String(String),
    /// Any other JSON value (array or object), kept as compact JSON
    Raw(Value),
}

impl DefaultValue {
    /// Convert a JSON value; `null` means "no default"
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(DefaultValue::Bool(*b)),
            Value::Number(n) => Some(DefaultValue::Number(n.clone())),
            Value::String(s) => Some(DefaultValue::String(s.clone())),
            other => Some(DefaultValue::Raw(other.clone())),
        }
    }

    /// Render the value verbatim for a DEFAULT clause
    pub fn to_sql(&self) -> String {
        match self {
            DefaultValue::Bool(v) => v.to_string(),
            DefaultValue::Number(n) => n.to_string(),
            DefaultValue::String(s) => s.clone(),
            DefaultValue::Raw(v) => v.to_string(),
        }
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        DefaultValue::Number(Number::from(value))
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        DefaultValue::String(value.to_string())
    }
}

impl std::fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_sql())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_column_new() {
        let col = ColumnSpec::new("user_id", StorageType::BigIntUnsigned, ScalarType::U64);
        assert_eq!(col.name, "user_id");
        assert_eq!(col.field_name, "UserId");
        assert!(!col.is_primary_key);
        assert!(!col.is_nullable);
        assert!(!col.has_default());
        assert_eq!(col.size, 0);
        assert!(col.is_valid());
    }

    #[test]
    fn test_column_builder() {
        let col = ColumnSpec::new("name", StorageType::Varchar, ScalarType::String)
            .with_field_name("Nickname")
            .with_size(32)
            .with_default("guest".into())
            .nullable()
            .with_comment("display name")
            .with_sequence(4);

        assert_eq!(col.field_name, "Nickname");
        assert_eq!(col.size, 32);
        assert!(col.is_character());
        assert!(col.is_nullable);
        assert_eq!(col.comment, "display name");
        assert_eq!(col.sequence_number, 4);
        assert_eq!(col.default_value, Some(DefaultValue::String("guest".into())));
    }

    #[test]
    fn test_column_validation() {
        let col = ColumnSpec::new("id", StorageType::BigInt, ScalarType::I64).with_field_name("");
        assert!(!col.is_valid());
    }

    #[test]
    fn test_default_from_json() {
        assert_eq!(DefaultValue::from_json(&json!(null)), None);
        assert_eq!(
            DefaultValue::from_json(&json!(true)),
            Some(DefaultValue::Bool(true))
        );
        assert_eq!(DefaultValue::from_json(&json!(0)).unwrap().to_sql(), "0");
        assert_eq!(DefaultValue::from_json(&json!(-3)).unwrap().to_sql(), "-3");
        assert_eq!(DefaultValue::from_json(&json!(1.5)).unwrap().to_sql(), "1.5");
        assert_eq!(
            DefaultValue::from_json(&json!("CURRENT_TIMESTAMP"))
                .unwrap()
                .to_sql(),
            "CURRENT_TIMESTAMP"
        );
        assert_eq!(
            DefaultValue::from_json(&json!([1, 2])).unwrap().to_sql(),
            "[1,2]"
        );
    }

    #[test]
    fn test_default_from_conversions() {
        assert_eq!(DefaultValue::from(7).to_string(), "7");
        assert_eq!(DefaultValue::from("x").to_string(), "x");
    }
}
