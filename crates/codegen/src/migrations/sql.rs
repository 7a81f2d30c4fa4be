//! MySQL statement generation.
//!
//! Every table contributes one block to each of the four scripts. The
//! blocks are plain text so they can be concatenated across tables in
//! schema order.

use tablegen_ir::{ColumnSpec, Schema, TableSpec};

use crate::{GeneratedFile, GeneratorConfig};

// ============================================================================
// Script kinds
// ============================================================================

/// The four scripts produced for a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    /// `CREATE TABLE` plus indexes
    Create,
    /// `ALTER TABLE ... CHANGE` for every column
    Alter,
    /// `ALTER TABLE ... DROP` for every column
    Drop,
    /// `ALTER TABLE ... ADD ... AFTER` for every column
    Add,
}

impl ScriptKind {
    /// All kinds, in the order their files are emitted
    pub const ALL: [ScriptKind; 4] = [
        ScriptKind::Create,
        ScriptKind::Alter,
        ScriptKind::Drop,
        ScriptKind::Add,
    ];

    /// File name of the script
    pub fn file_name(&self) -> &'static str {
        match self {
            ScriptKind::Create => "__all_table_create.sql",
            ScriptKind::Alter => "__all_table_field_alter.sql",
            ScriptKind::Drop => "__all_table_field_drop.sql",
            ScriptKind::Add => "__all_table_field_add.sql",
        }
    }

    /// Render this kind of block for one table; `package` qualifies the
    /// model name in the create banner
    pub fn render(&self, table: &TableSpec, package: &str) -> String {
        match self {
            ScriptKind::Create => create_table_sql(table, package),
            ScriptKind::Alter => alter_columns_sql(table),
            ScriptKind::Drop => drop_columns_sql(table),
            ScriptKind::Add => add_columns_sql(table),
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Generate the four SQL scripts for every table in the schema.
pub fn generate_migrations(schema: &Schema, config: &GeneratorConfig) -> Vec<GeneratedFile> {
    ScriptKind::ALL
        .iter()
        .map(|kind| generate_script(schema, *kind, config))
        .collect()
}

fn generate_script(schema: &Schema, kind: ScriptKind, config: &GeneratorConfig) -> GeneratedFile {
    let content: String = schema
        .tables()
        .iter()
        .map(|t| kind.render(t, &config.package))
        .collect();
    GeneratedFile::sql(config.sql_dir.join(kind.file_name()), content)
}

// ============================================================================
// Statement blocks
// ============================================================================

/// `CREATE TABLE IF NOT EXISTS` block with its indexes, under a banner
/// naming `package.Model`
pub fn create_table_sql(table: &TableSpec, package: &str) -> String {
    let mut sql = String::with_capacity(256);
    let pks = table.primary_keys();

    sql.push_str(&banner(&format!(
        "Table Structure for `{}.{}`",
        package, table.model_name
    )));
    sql.push_str(&format!("CREATE TABLE IF NOT EXISTS `{}` (\n", table.name));

    let last = table.columns.len().saturating_sub(1);
    for (i, column) in table.columns.iter().enumerate() {
        sql.push_str("    ");
        sql.push_str(&column_clause(column));
        if i < last || !pks.is_empty() {
            sql.push(',');
        }
        sql.push('\n');
    }

    if !pks.is_empty() {
        let names: Vec<String> = pks.iter().map(|c| quote_ident(&c.name)).collect();
        sql.push_str(&format!("    PRIMARY KEY({})\n", names.join(",")));
    }

    sql.push_str(&format!(
        ") ENGINE=InnoDB COMMENT={} DEFAULT CHARSET=utf8;\n",
        quote_literal(&table.comment)
    ));

    for index in &table.indexes {
        let columns: Vec<String> = index.columns.iter().map(|c| quote_ident(c)).collect();
        sql.push_str(&format!(
            "CREATE INDEX {} ON {} ({});\n",
            quote_ident(&index.name_for(&table.name)),
            quote_ident(&table.name),
            columns.join(", ")
        ));
    }

    sql.push('\n');
    sql
}

/// One `ALTER TABLE ... CHANGE` per column
pub fn alter_columns_sql(table: &TableSpec) -> String {
    per_column_block(table, |column, _| {
        format!(
            "ALTER TABLE {} CHANGE {} {};\n",
            quote_ident(&table.name),
            quote_ident(&column.name),
            column_clause(column)
        )
    })
}

/// One `ALTER TABLE ... DROP` per column
pub fn drop_columns_sql(table: &TableSpec) -> String {
    per_column_block(table, |column, _| {
        format!(
            "ALTER TABLE {} DROP {};\n",
            quote_ident(&table.name),
            quote_ident(&column.name)
        )
    })
}

/// One `ALTER TABLE ... ADD` per column, positioned after its predecessor
pub fn add_columns_sql(table: &TableSpec) -> String {
    per_column_block(table, |column, previous| {
        let position = match previous {
            Some(prev) => format!(" AFTER {}", quote_ident(&prev.name)),
            None => String::new(),
        };
        format!(
            "ALTER TABLE {} ADD {}{};\n",
            quote_ident(&table.name),
            column_clause(column),
            position
        )
    })
}

fn per_column_block<F>(table: &TableSpec, mut statement: F) -> String
where
    F: FnMut(&ColumnSpec, Option<&ColumnSpec>) -> String,
{
    let mut sql = banner(&quote_ident(&table.name));

    let mut previous = None;
    for column in &table.columns {
        sql.push_str(&statement(column, previous));
        previous = Some(column);
    }

    sql.push('\n');
    sql
}

// ============================================================================
// Column clauses
// ============================================================================

/// Column definition without the trailing comment:
/// `` `name` varchar(32) NOT NULL DEFAULT '' ``
pub fn column_definition(column: &ColumnSpec) -> String {
    let mut def = quote_ident(&column.name);
    def.push(' ');
    def.push_str(column.storage_type.as_str());

    if column.is_character() {
        def.push_str(&format!("({})", column.size));
    }

    def.push_str(if column.is_nullable { " NULL" } else { " NOT NULL" });

    if let Some(default) = &column.default_value {
        if column.is_character() {
            def.push_str(" DEFAULT ''");
        } else {
            def.push_str(&format!(" DEFAULT {}", default.to_sql()));
        }
    }

    def
}

/// Column definition followed by its `COMMENT` clause
pub fn column_clause(column: &ColumnSpec) -> String {
    format!(
        "{} COMMENT {}",
        column_definition(column),
        quote_literal(&column.comment)
    )
}

fn banner(title: &str) -> String {
    const RULE: &str = "-- --------------------------------------------------\n";
    format!("{RULE}--  {title}\n{RULE}")
}

fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

fn quote_literal(text: &str) -> String {
    format!("'{}'", text.replace('\\', "\\\\").replace('\'', "''"))
}

// ============================================================================
// Tests
// ============================================================================
