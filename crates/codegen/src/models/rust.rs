//! Rust model emitter.
//!
//! Each table becomes a struct deriving the ORM's `Model` trait. Column
//! metadata travels in `#[orm(...)]` attributes; nullable columns are
//! wrapped in `Option`.

use heck::ToSnakeCase;
use tablegen_ir::{ColumnSpec, Schema, TableSpec};

use super::fields_with_key;
use crate::GeneratorConfig;

const HEADER: &str = "// @generated by tablegen. Do not edit by hand.\n\n";

/// Keywords and reserved words usable as raw identifiers
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Path keywords; `r#` is not allowed on these
const PATH_KEYWORDS: &[&str] = &["crate", "self", "super", "Self"];

/// Render `{table}.rs`
pub fn render_model(table: &TableSpec, config: &GeneratorConfig) -> String {
    let mut content = String::with_capacity(512);

    content.push_str(HEADER);
    content.push_str(&format!("use {}::Model;\n\n", config.orm_crate));

    content.push_str(&doc_comment(&table.comment, ""));
    content.push_str("#[derive(Debug, Clone, Default, PartialEq, Eq, Model)]\n");
    content.push_str(&format!("#[orm(table = \"{}\")]\n", table.name));
    content.push_str(&format!("pub struct {} {{\n", table.model_name));

    for (column, is_key) in fields_with_key(table) {
        content.push_str(&render_field(column, is_key));
    }

    content.push_str("}\n");
    content
}

fn render_field(column: &ColumnSpec, is_key: bool) -> String {
    let mut field = doc_comment(&column.comment, "    ");

    let mut attrs = vec![format!("column = \"{}\"", column.name)];
    if column.is_nullable {
        attrs.push("null".to_string());
    }
    if is_key {
        attrs.push("pk".to_string());
    }
    if column.size > 0 {
        attrs.push(format!("size = {}", column.size));
    }
    field.push_str(&format!("    #[orm({})]\n", attrs.join(", ")));

    let ty = column.scalar_type.to_rust_type();
    let ty = if column.is_nullable {
        format!("Option<{ty}>")
    } else {
        ty.to_string()
    };
    field.push_str(&format!("    pub {}: {},\n", field_ident(&column.field_name), ty));

    field
}

/// Render `mod.rs`: module declarations, re-exports and `register_models`
pub fn render_registration(schema: &Schema, config: &GeneratorConfig) -> String {
    let mut content = String::with_capacity(512);
    let registrar = config.registrar();

    content.push_str(HEADER);

    for table in schema.tables() {
        let module = module_ident(&table.name);
        if module != table.name {
            content.push_str(&format!("#[path = \"{}.rs\"]\n", table.name));
        }
        content.push_str(&format!("pub mod {module};\n"));
    }

    if !schema.is_empty() {
        content.push('\n');
        for table in schema.tables() {
            content.push_str(&format!(
                "pub use {}::{};\n",
                module_ident(&table.name),
                table.model_name
            ));
        }
    }

    content.push_str("\n/// Register every generated model with the persistence layer.\n");
    content.push_str("pub fn register_models() {\n");
    for table in schema.tables() {
        content.push_str(&format!("    {}::<{}>();\n", registrar, table.model_name));
    }
    content.push_str("}\n");

    content
}

/// Snake-case identifier for a model field or module. Keywords become raw
/// identifiers; path keywords get a trailing underscore, names starting
/// with a digit a leading one.
pub fn field_ident(field_name: &str) -> String {
    let ident = field_name.to_snake_case();
    if KEYWORDS.contains(&ident.as_str()) {
        format!("r#{ident}")
    } else if PATH_KEYWORDS.contains(&ident.as_str()) {
        format!("{ident}_")
    } else if ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{ident}")
    } else {
        ident
    }
}

fn module_ident(table: &str) -> String {
    field_ident(table)
}

fn doc_comment(text: &str, indent: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("{indent}/// {}\n", line.trim()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tablegen_core::{ScalarType, StorageType};

    fn users() -> TableSpec {
        TableSpec::new("users")
            .with_model_name("User")
            .with_comment("user table")
            .with_column(
                ColumnSpec::new("id", StorageType::BigInt, ScalarType::I64)
                    .with_field_name("Id")
                    .primary_key()
                    .with_comment("id"),
            )
            .with_column(
                ColumnSpec::new("name", StorageType::Varchar, ScalarType::String)
                    .with_field_name("Name")
                    .with_size(32)
                    .with_comment("name"),
            )
    }

    #[test]
    fn test_render_users_model() {
        let expected = r#"// @generated by tablegen. Do not edit by hand.

use orm::Model;

/// user table
#[derive(Debug, Clone, Default, PartialEq, Eq, Model)]
#[orm(table = "users")]
pub struct User {
    /// id
    #[orm(column = "id", pk)]
    pub id: i64,
    /// name
    #[orm(column = "name", size = 32)]
    pub name: String,
}
"#;
        assert_eq!(render_model(&users(), &GeneratorConfig::new()), expected);
    }

    #[test]
    fn test_nullable_field_is_optional() {
        let column = ColumnSpec::new("nick", StorageType::Char, ScalarType::String)
            .with_field_name("NickName")
            .with_size(16)
            .nullable();

        assert_eq!(
            render_field(&column, false),
            "    #[orm(column = \"nick\", null, size = 16)]\n    pub nick_name: Option<String>,\n"
        );
    }

    #[test]
    fn test_only_first_primary_key_is_annotated() {
        let table = TableSpec::new("t")
            .with_column(ColumnSpec::new("a", StorageType::Int, ScalarType::I32).primary_key())
            .with_column(ColumnSpec::new("b", StorageType::Int, ScalarType::I32).primary_key());

        let model = render_model(&table, &GeneratorConfig::new());
        assert_eq!(model.matches(", pk").count(), 1);
        assert!(model.contains("#[orm(column = \"a\", pk)]"));
        assert!(model.contains("#[orm(column = \"b\")]"));
    }

    #[test]
    fn test_keyword_fields_are_escaped() {
        assert_eq!(field_ident("Type"), "r#type");
        assert_eq!(field_ident("UserId"), "user_id");
        assert_eq!(field_ident("final"), "r#final");
        assert_eq!(field_ident("Abstract"), "r#abstract");
        assert_eq!(field_ident("Virtual"), "r#virtual");
    }

    #[test]
    fn test_path_keywords_and_digits_get_underscores() {
        assert_eq!(field_ident("self"), "self_");
        assert_eq!(field_ident("Self"), "self_");
        assert_eq!(field_ident("Crate"), "crate_");
        assert_eq!(field_ident("super"), "super_");
        assert_eq!(field_ident("2fa"), "_2fa");
    }

    #[test]
    fn test_reserved_names_in_model_and_registration() {
        let table = TableSpec::new("self")
            .with_model_name("Me")
            .with_column(ColumnSpec::new("final", StorageType::Int, ScalarType::I32))
            .with_column(ColumnSpec::new("crate", StorageType::Int, ScalarType::I32));

        let model = render_model(&table, &GeneratorConfig::new());
        assert!(model.contains("    pub r#final: i32,\n"));
        assert!(model.contains("    pub crate_: i32,\n"));
        assert!(model.contains("#[orm(column = \"final\")]"));

        let registration = render_registration(&Schema::from(vec![table]), &GeneratorConfig::new());
        assert!(registration.contains("#[path = \"self.rs\"]\npub mod self_;\n"));
        assert!(registration.contains("pub use self_::Me;\n"));
    }

    #[test]
    fn test_render_registration() {
        let schema = Schema::from(vec![
            users(),
            TableSpec::new("login-log")
                .with_model_name("LoginLog")
                .with_column(ColumnSpec::new("id", StorageType::Int, ScalarType::I32)),
        ]);
        let config = GeneratorConfig::new().with_registrar("crate::db::register");

        let expected = r#"// @generated by tablegen. Do not edit by hand.

pub mod users;
#[path = "login-log.rs"]
pub mod login_log;

pub use users::User;
pub use login_log::LoginLog;

/// Register every generated model with the persistence layer.
pub fn register_models() {
    crate::db::register::<User>();
    crate::db::register::<LoginLog>();
}
"#;
        assert_eq!(render_registration(&schema, &config), expected);
    }
}
