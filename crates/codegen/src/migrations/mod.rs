//! # SQL Generation
//!
//! This module generates the MySQL scripts for a schema. Every script
//! covers all tables, concatenated in schema order.
//!
//! ## Generated Files
//!
//! ```text
//! {sql_dir}/__all_table_create.sql
//! {sql_dir}/__all_table_field_alter.sql
//! {sql_dir}/__all_table_field_drop.sql
//! {sql_dir}/__all_table_field_add.sql
//! ```
//!
//! ## Features
//!
//! - `CREATE TABLE IF NOT EXISTS` with `PRIMARY KEY` and composite indexes
//! - Per-column `CHANGE`, `DROP` and `ADD ... AFTER` statements

pub mod sql;

pub use sql::{
    ScriptKind, add_columns_sql, alter_columns_sql, column_clause, column_definition,
    create_table_sql, drop_columns_sql, generate_migrations,
};
