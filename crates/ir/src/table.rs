//! Table definitions
//!
//! This module contains the `TableSpec` struct: one database table with its
//! ordered columns and composite indexes.

use std::collections::HashSet;

use heck::ToPascalCase;
use tablegen_core::{EngineError, EngineResult, Validatable};

use crate::column::ColumnSpec;
use crate::index::IndexSpec;

// ============================================================================
// TableSpec
// ============================================================================

/// Represents a database table (maps to one generated model)
#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    /// Storage table name, also the stem of the model file name
    pub name: String,

    /// Name of the generated model type
    pub model_name: String,

    /// Table comment
    pub comment: String,

    /// Columns in rendering order
    pub columns: Vec<ColumnSpec>,

    /// Composite indexes, in declaration order
    pub indexes: Vec<IndexSpec>,
}

impl TableSpec {
    /// Create a new empty table; the model name defaults to the PascalCase
    /// form of the table name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let model_name = name.to_pascal_case();

        Self {
            name,
            model_name,
            comment: String::new(),
            columns: Vec::new(),
            indexes: Vec::new(),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the model name
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Set the table comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Append a column and return the table
    pub fn with_column(mut self, column: ColumnSpec) -> Self {
        self.columns.push(column);
        self
    }

    /// Append an index and return the table
    pub fn with_index(mut self, index: IndexSpec) -> Self {
        self.indexes.push(index);
        self
    }

    // ========================================================================
    // Mutation (used while loading)
    // ========================================================================

    /// Append a column
    pub fn add_column(&mut self, column: ColumnSpec) {
        self.columns.push(column);
    }

    /// Append an index
    pub fn add_index(&mut self, index: IndexSpec) {
        self.indexes.push(index);
    }

    /// Put the columns into rendering order: ascending sequence number,
    /// columns with equal numbers keep their declaration order.
    pub fn sort_columns(&mut self) {
        self.columns.sort_by_key(|c| c.sequence_number);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Get a column by storage name
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Every primary-key column, in rendering order
    pub fn primary_keys(&self) -> Vec<&ColumnSpec> {
        self.columns.iter().filter(|c| c.is_primary_key).collect()
    }

    /// Whether any column is a primary key
    pub fn has_primary_key(&self) -> bool {
        self.columns.iter().any(|c| c.is_primary_key)
    }

    /// The single column annotated as primary key in generated models: the
    /// first primary-key column in rendering order.
    pub fn model_primary_key(&self) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.is_primary_key)
    }

    /// Index column references that do not name a column of this table
    pub fn unknown_index_columns(&self) -> Vec<&str> {
        self.indexes
            .iter()
            .flat_map(|idx| idx.columns.iter())
            .filter(|name| self.column(name).is_none())
            .map(String::as_str)
            .collect()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

impl Validatable for TableSpec {
    fn validate(&self) -> EngineResult<()> {
        if self.name.is_empty() {
            return Err(EngineError::invalid_table("", "table name cannot be empty"));
        }

        if self.model_name.is_empty() {
            return Err(EngineError::invalid_table(
                &self.name,
                "model name cannot be empty",
            ));
        }

        if self.columns.is_empty() {
            return Err(EngineError::invalid_table(
                &self.name,
                "table must declare at least one column",
            ));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            column.validate()?;
            if !seen.insert(column.name.as_str()) {
                return Err(EngineError::invalid_table(
                    &self.name,
                    format!("duplicate column '{}'", column.name),
                ));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
