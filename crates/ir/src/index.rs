//! Composite index definitions

/// A (non-unique) index over an ordered list of columns.
///
/// Column names are references into the owning table and are not checked
/// for existence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndexSpec {
    /// Indexed column names, in index order
    pub columns: Vec<String>,
}

impl IndexSpec {
    /// Create an index over the given columns
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Index name: the table name followed by every column, joined with `_`
    pub fn name_for(&self, table: &str) -> String {
        let mut name = table.to_string();
        for column in &self.columns {
            name.push('_');
            name.push_str(column);
        }
        name
    }

    /// Whether the index has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_name() {
        let index = IndexSpec::new(["account", "created"]);
        assert_eq!(index.name_for("users"), "users_account_created");
    }

    #[test]
    fn test_index_name_single_column() {
        assert_eq!(IndexSpec::new(["email"]).name_for("users"), "users_email");
    }

    #[test]
    fn test_empty_index() {
        let index = IndexSpec::default();
        assert!(index.is_empty());
        assert_eq!(index.name_for("users"), "users");
    }
}
