//! Schema loader
//!
//! Turns a generically parsed JSON document into a [`Schema`]. The document
//! maps table names to table bodies:
//!
//! ```json
//! {
//!   "users": {
//!     "model_name": "User",
//!     "comment": "user table",
//!     "index": [["name", "age"]],
//!     "id":   { "type": "bigint", "pk": true, "sn": 1, "model_name": "Id" },
//!     "name": { "type": "varchar", "size": 32, "sn": 2, "default": "" }
//!   }
//! }
//! ```
//!
//! Inside a table body, `model_name`, `comment` and `index` are table
//! attributes; every other key declares a column. Any malformed entry aborts
//! the whole load.

use serde_json::{Map, Value};
use tablegen_core::{EngineError, EngineResult, TypeMap, Validatable};

use crate::column::{ColumnSpec, DefaultValue, default_field_name};
use crate::index::IndexSpec;
use crate::schema::Schema;
use crate::table::TableSpec;

/// Attribute keys recognised in the schema document
pub mod keys {
    /// Model name of a table or field name of a column
    pub const MODEL_NAME: &str = "model_name";
    /// Table or column comment
    pub const COMMENT: &str = "comment";
    /// Table index groups
    pub const INDEX: &str = "index";
    /// Column storage type
    pub const TYPE: &str = "type";
    /// Column primary-key flag
    pub const PK: &str = "pk";
    /// Column nullability flag
    pub const NULL: &str = "null";
    /// Column default value
    pub const DEFAULT: &str = "default";
    /// Column sequence number
    pub const SN: &str = "sn";
    /// Column size
    pub const SIZE: &str = "size";
}

// ============================================================================
// SchemaLoader
// ============================================================================

/// Builds [`Schema`] values using an injected [`TypeMap`].
#[derive(Debug, Clone, Default)]
pub struct SchemaLoader {
    type_map: TypeMap,
}

impl SchemaLoader {
    /// Create a loader that resolves column types through `type_map`
    pub fn new(type_map: TypeMap) -> Self {
        Self { type_map }
    }

    /// The type map used to resolve column types
    pub fn type_map(&self) -> &TypeMap {
        &self.type_map
    }

    /// Parse JSON text and load it
    pub fn load_str(&self, json: &str) -> EngineResult<Schema> {
        let document: Value = serde_json::from_str(json)?;
        self.load_value(&document)
    }

    /// Load a parsed document. Tables keep document order.
    pub fn load_value(&self, document: &Value) -> EngineResult<Schema> {
        let tables = document
            .as_object()
            .ok_or_else(|| EngineError::malformed("top-level document must be an object"))?;

        let mut schema = Schema::new();
        for (name, body) in tables {
            let table = self.load_table(name, body)?;
            schema.add_table(table);
        }

        schema.validate()?;

        tracing::debug!(
            tables = schema.table_count(),
            columns = schema.column_count(),
            "schema loaded"
        );

        Ok(schema)
    }

    /// Load one table body
    pub fn load_table(&self, name: &str, body: &Value) -> EngineResult<TableSpec> {
        let body = body
            .as_object()
            .ok_or_else(|| EngineError::malformed(format!("table '{}' is not an object", name)))?;

        let mut table = TableSpec::new(name);

        for (key, value) in body {
            match key.as_str() {
                keys::MODEL_NAME => {
                    table.model_name = expect_str(value, name, keys::MODEL_NAME)?.to_string();
                }
                keys::COMMENT => {
                    table.comment = expect_str(value, name, keys::COMMENT)?.to_string();
                }
                keys::INDEX => {
                    for index in parse_indexes(name, value)? {
                        table.add_index(index);
                    }
                }
                column => {
                    let attrs = value.as_object().ok_or_else(|| {
                        EngineError::malformed(format!(
                            "column '{}.{}' is not an object",
                            name, column
                        ))
                    })?;
                    table.add_column(self.load_column(name, column, attrs)?);
                }
            }
        }

        table.sort_columns();

        for missing in table.unknown_index_columns() {
            tracing::warn!(
                table = %table.name,
                column = %missing,
                "index references a column the table does not declare"
            );
        }

        table.validate()?;

        tracing::debug!(
            table = %table.name,
            model = %table.model_name,
            columns = table.column_count(),
            indexes = table.indexes.len(),
            "table loaded"
        );

        Ok(table)
    }

    /// Load one column from its attribute map
    pub fn load_column(
        &self,
        table: &str,
        name: &str,
        attrs: &Map<String, Value>,
    ) -> EngineResult<ColumnSpec> {
        let owner = format!("{}.{}", table, name);

        let type_name = match attrs.get(keys::TYPE) {
            Some(value) => expect_str(value, &owner, keys::TYPE)?,
            None => {
                return Err(EngineError::MissingType {
                    table: table.to_string(),
                    column: name.to_string(),
                });
            }
        };

        let (storage, scalar) = self
            .type_map
            .lookup(type_name)
            .map_err(|_| EngineError::UnsupportedType {
                table: table.to_string(),
                column: name.to_string(),
                storage_type: type_name.to_string(),
            })?;

        let mut column = ColumnSpec::new(name, storage, scalar);

        for (key, value) in attrs {
            match key.as_str() {
                keys::TYPE => {}
                keys::PK => column.is_primary_key = expect_bool(value, &owner, keys::PK)?,
                keys::NULL => column.is_nullable = expect_bool(value, &owner, keys::NULL)?,
                keys::DEFAULT => column.default_value = DefaultValue::from_json(value),
                keys::MODEL_NAME => {
                    column.field_name = expect_str(value, &owner, keys::MODEL_NAME)?.to_string();
                }
                keys::COMMENT => {
                    column.comment = expect_str(value, &owner, keys::COMMENT)?.to_string();
                }
                keys::SN => column.sequence_number = expect_integer(value, &owner, keys::SN)?,
                keys::SIZE => column.size = expect_size(value, &owner)?,
                other => {
                    tracing::debug!(
                        column = %owner,
                        attribute = other,
                        "ignoring unknown attribute"
                    );
                }
            }
        }

        if column.field_name.is_empty() {
            column.field_name = default_field_name(name);
        }

        if column.is_character() && column.size == 0 {
            return Err(EngineError::MissingSize {
                table: table.to_string(),
                column: name.to_string(),
                storage_type: storage.to_string(),
            });
        }

        Ok(column)
    }
}

// ============================================================================
// Index groups
// ============================================================================

/// Parse `[[col, ...], ...]` into index specs; empty groups are skipped.
fn parse_indexes(table: &str, value: &Value) -> EngineResult<Vec<IndexSpec>> {
    let groups = value.as_array().ok_or_else(|| {
        EngineError::malformed_index(table, format!("expected a list, found {}", value))
    })?;

    let mut indexes = Vec::with_capacity(groups.len());
    for (i, group) in groups.iter().enumerate() {
        let names = group.as_array().ok_or_else(|| {
            EngineError::malformed_index(
                table,
                format!("index group {} is not a list: {}", i, group),
            )
        })?;

        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_str().ok_or_else(|| {
                EngineError::malformed_index(
                    table,
                    format!("index group {} has a non-string column: {}", i, name),
                )
            })?;
            columns.push(name.to_string());
        }

        if columns.is_empty() {
            tracing::warn!(table, group = i, "skipping empty index group");
            continue;
        }

        indexes.push(IndexSpec { columns });
    }

    Ok(indexes)
}

// ============================================================================
// Primitive extraction
// ============================================================================

fn expect_str<'a>(value: &'a Value, owner: &str, attribute: &str) -> EngineResult<&'a str> {
    value
        .as_str()
        .ok_or_else(|| EngineError::attribute_type(owner, attribute, "a string", value))
}

fn expect_bool(value: &Value, owner: &str, attribute: &str) -> EngineResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| EngineError::attribute_type(owner, attribute, "a boolean", value))
}

/// Any JSON number; fractional parts are truncated.
fn expect_integer(value: &Value, owner: &str, attribute: &str) -> EngineResult<i64> {
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    match value.as_f64() {
        Some(f) if f.is_finite() => Ok(f.trunc() as i64),
        _ => Err(EngineError::attribute_type(owner, attribute, "a number", value)),
    }
}

fn expect_size(value: &Value, owner: &str) -> EngineResult<u32> {
    let n = expect_integer(value, owner, keys::SIZE)?;
    u32::try_from(n).map_err(|_| {
        EngineError::attribute_type(owner, keys::SIZE, "a non-negative number", value)
    })
}

// ============================================================================
// Tests
// ============================================================================
