//! The loaded schema: every table, in document order

use std::collections::HashSet;

use tablegen_core::{EngineError, EngineResult, Validatable};

use crate::table::TableSpec;

/// Ordered collection of tables.
///
/// The order is the order in which tables appear in the schema document; it
/// drives the order of every concatenated output artifact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    tables: Vec<TableSpec>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a table
    pub fn add_table(&mut self, table: TableSpec) {
        self.tables.push(table);
    }

    /// All tables in document order
    pub fn tables(&self) -> &[TableSpec] {
        &self.tables
    }

    /// Get a table by storage name
    pub fn table(&self, name: &str) -> Option<&TableSpec> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Number of tables
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Total number of columns across all tables
    pub fn column_count(&self) -> usize {
        self.tables.iter().map(TableSpec::column_count).sum()
    }

    /// Check if the schema has no tables
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl From<Vec<TableSpec>> for Schema {
    fn from(tables: Vec<TableSpec>) -> Self {
        Self { tables }
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a TableSpec;
    type IntoIter = std::slice::Iter<'a, TableSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}

impl Validatable for Schema {
    fn validate(&self) -> EngineResult<()> {
        let mut seen = HashSet::new();
        for table in &self.tables {
            table.validate()?;
            if !seen.insert(table.name.as_str()) {
                return Err(EngineError::invalid_table(
                    &table.name,
                    "table declared more than once",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColumnSpec;
    use tablegen_core::{ScalarType, StorageType};

    fn table(name: &str) -> TableSpec {
        TableSpec::new(name).with_column(ColumnSpec::new("id", StorageType::Int, ScalarType::I32))
    }

    #[test]
    fn test_schema_keeps_insertion_order() {
        let mut schema = Schema::new();
        schema.add_table(table("zeta"));
        schema.add_table(table("alpha"));

        let names: Vec<&str> = schema.tables().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(schema.table_count(), 2);
        assert_eq!(schema.column_count(), 2);
        assert!(schema.table("alpha").is_some());
        assert!(schema.is_valid());
    }

    #[test]
    fn test_duplicate_table_is_invalid() {
        let schema = Schema::from(vec![table("users"), table("users")]);
        assert!(!schema.is_valid());
    }
}
