//! Go model emitter (beego-style `orm` struct tags).

use tablegen_ir::{ColumnSpec, Schema, TableSpec};

use super::fields_with_key;
use crate::GeneratorConfig;

const HEADER: &str = "// Code generated by tablegen. DO NOT EDIT.\n\n";

/// Render `{table}.go`
pub fn render_model(table: &TableSpec, config: &GeneratorConfig) -> String {
    let mut content = String::with_capacity(512);

    content.push_str(HEADER);
    content.push_str(&format!("package {}\n\n", config.package));

    content.push_str(&line_comments(&table.comment, ""));
    content.push_str(&format!("type {} struct {{\n", table.model_name));

    for (column, is_key) in fields_with_key(table) {
        content.push_str(&line_comments(&column.comment, "\t"));
        content.push_str(&format!(
            "\t{} {} `orm:\"{}\"`\n",
            column.field_name,
            column.scalar_type.to_go_type(),
            orm_tag(column, is_key)
        ));
    }

    content.push_str("}\n");
    content
}

/// Tag body: `column(x);null;pk;size(n)`
pub fn orm_tag(column: &ColumnSpec, is_key: bool) -> String {
    let mut tag = format!("column({})", column.name);
    if column.is_nullable {
        tag.push_str(";null");
    }
    if is_key {
        tag.push_str(";pk");
    }
    if column.size > 0 {
        tag.push_str(&format!(";size({})", column.size));
    }
    tag
}

/// Render `common.go`, registering every model in one call
pub fn render_registration(schema: &Schema, config: &GeneratorConfig) -> String {
    let mut content = String::with_capacity(512);
    let registrar = config.registrar();

    content.push_str(HEADER);
    content.push_str(&format!("package {}\n\n", config.package));

    if let Some(import) = registrar_import(&registrar, config) {
        content.push_str(&format!("import \"{import}\"\n\n"));
    }

    content.push_str("// RegisterModels registers every generated model with the ORM.\n");
    content.push_str("func RegisterModels() {\n");
    content.push_str(&format!("\t{registrar}(\n"));
    for table in schema.tables() {
        content.push_str(&format!("\t\tnew({}),\n", table.model_name));
    }
    content.push_str("\t)\n}\n");

    content
}

fn registrar_import(registrar: &str, config: &GeneratorConfig) -> Option<String> {
    config.registrar_import.clone().or_else(|| {
        registrar
            .rsplit_once('.')
            .map(|(qualifier, _)| qualifier.to_string())
    })
}

fn line_comments(text: &str, indent: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("{indent}// {}\n", line.trim()))
        .collect()
}
