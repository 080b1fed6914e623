//! SQL dialect support.
//!
//! Each supported database implements [`Dialect`]. The trait's default
//! methods hold the behaviour shared by every dialect; implementations
//! override what their database does differently. Which implementation is
//! used is decided once, from [`DialectConfig`](crate::config::DialectConfig).

mod hsqldb;
mod sybase;

pub use hsqldb::{HsqldbDialect, HsqldbVariant};
pub use sybase::SybaseDialect;

use std::fmt;

use crate::column::{AbstractKind, ColumnSpec, RawColumn};
use crate::ddl::{self, DdlOperation};
use crate::error::Result;
use crate::identity::{self, ExecOutcome, StatementExecutor};
use crate::introspect::{self, SchemaIntrospector};
use crate::pagination::{QuerySpec, RewriteResult};
use crate::quote;
use crate::types::{self, TypeDeclaration, TypeTable};
use crate::value::Value;

/// How a dialect expresses a row window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialectFamily {
    /// `SELECT LIMIT <offset> <limit> ...`.
    PrefixWindow,
    /// `TOP` plus an exclusion subquery.
    TopExclusion,
}

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns how the dialect paginates.
    fn family(&self) -> DialectFamily;

    /// Returns the dialect's type table.
    fn type_table(&self) -> &TypeTable;

    // Quoting

    /// Literal for `true`.
    fn quoted_true(&self) -> &'static str {
        "1"
    }

    /// Literal for `false`.
    fn quoted_false(&self) -> &'static str {
        "0"
    }

    /// Whether an empty string is emitted as `''` without escaping.
    fn quotes_empty_string_directly(&self) -> bool {
        false
    }

    /// Escapes the body of a string literal.
    fn quote_string(&self, text: &str) -> String {
        quote::escape_string(text)
    }

    /// Quotes a column name if the dialect requires it.
    fn quote_column_name(&self, name: &str) -> String {
        quote::quote_identifier(name)
    }

    /// Quotes a table name if the dialect requires it.
    fn quote_table_name(&self, name: &str) -> String {
        self.quote_column_name(name)
    }

    /// Renders a value as a SQL literal, see [`quote::quote`].
    ///
    /// # Errors
    ///
    /// Returns a coercion error when the value does not fit the column.
    fn quote(&self, value: &Value, column: Option<&ColumnSpec>) -> Result<String> {
        quote::quote(self, value, column)
    }

    // Types

    /// Renders a column type, see [`types::type_to_sql`].
    fn type_to_sql(
        &self,
        kind: AbstractKind,
        limit: Option<u32>,
        precision: Option<u32>,
        scale: Option<u32>,
    ) -> TypeDeclaration {
        types::type_to_sql(self, kind, limit, precision, scale)
    }

    /// Maps a declared SQL type read from the database to a kind.
    fn simplified_type(&self, sql_type: &str) -> AbstractKind {
        introspect::generic_kind(sql_type)
    }

    /// Extracts the length limit from a declared SQL type.
    fn extract_limit(&self, sql_type: &str) -> Option<u32> {
        introspect::extract_limit(sql_type)
    }

    /// Normalizes a default value reported by the driver.
    fn parse_default(&self, default: &str) -> Option<String> {
        introspect::generic_default(default)
    }

    /// Builds a [`ColumnSpec`] from an introspected column.
    fn interpret(&self, raw: &RawColumn) -> ColumnSpec {
        introspect::interpret(self, raw)
    }

    // Pagination

    /// Rewrites a statement to return only the requested window.
    ///
    /// # Errors
    ///
    /// Fails when the statement shape is not recognized or introspection
    /// fails.
    fn add_limit_offset(
        &self,
        query: &QuerySpec,
        introspector: &dyn SchemaIntrospector,
    ) -> Result<RewriteResult>;

    // DDL

    /// Renders a schema change, see [`ddl::generate_sql`].
    ///
    /// # Errors
    ///
    /// Returns a coercion error when a default does not fit its column.
    fn generate_sql(&self, operation: &DdlOperation) -> Result<Vec<String>> {
        ddl::generate_sql(self, operation)
    }

    /// `ALTER` statement changing a column's type.
    fn change_column_sql(&self, table: &str, column: &str, decl: &TypeDeclaration) -> String;

    /// `ALTER` statement changing a column's default to an already quoted
    /// literal.
    fn change_column_default_sql(&self, table: &str, column: &str, default: &str) -> String;

    /// Statement renaming a column.
    fn rename_column_sql(&self, table: &str, old_name: &str, new_name: &str) -> String;

    /// Statement renaming a table.
    fn rename_table_sql(&self, old_name: &str, new_name: &str) -> String;

    /// Statement dropping an index.
    fn remove_index_sql(&self, table: &str, index_name: &str) -> String;

    /// Statements creating a database.
    fn create_database_sql(&self, name: &str) -> Vec<String>;

    /// Statements dropping a database.
    fn drop_database_sql(&self, name: &str) -> Vec<String>;

    /// Statements dropping and recreating a database.
    fn recreate_database_sql(&self, name: &str) -> Vec<String> {
        let mut statements = self.drop_database_sql(name);
        statements.extend(self.create_database_sql(name));
        statements
    }

    // Identity and catalog

    /// Query returning the session's last generated key.
    fn last_identity_query(&self) -> Option<&'static str>;

    /// Executes a statement, returning the generated key for INSERTs.
    ///
    /// # Errors
    ///
    /// See [`identity::execute`].
    fn execute<E>(&self, executor: &E, sql: &str) -> Result<ExecOutcome<E::Output>>
    where
        E: StatementExecutor + ?Sized,
        Self: Sized,
    {
        identity::execute(self, executor, sql)
    }

    /// Case-insensitive prefix of system table names.
    fn system_table_prefix(&self) -> &'static str;

    /// Returns true for names of system tables.
    fn is_system_table(&self, name: &str) -> bool {
        let prefix = self.system_table_prefix();
        name.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    }
}
