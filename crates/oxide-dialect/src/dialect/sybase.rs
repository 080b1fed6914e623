//! Sybase dialect.
//!
//! Sybase has `TOP` but no `OFFSET`, so windows with an offset are built
//! from an exclusion subquery or staged into a temp table, depending on
//! the configured [`OffsetStrategy`].

use std::sync::LazyLock;

use super::{Dialect, DialectFamily};
use crate::column::AbstractKind;
use crate::error::Result;
use crate::introspect::SchemaIntrospector;
use crate::pagination::{OffsetStrategy, QuerySpec, RewriteResult, exclusion};
use crate::types::{TypeDeclaration, TypeRule, TypeTable};

static TYPES: LazyLock<TypeTable> = LazyLock::new(|| {
    TypeTable::new("NUMERIC(22,0) IDENTITY PRIMARY KEY", |kind| match kind {
        AbstractKind::String => TypeRule::limited("varchar", 255),
        AbstractKind::Text => TypeRule::named("text"),
        AbstractKind::Integer | AbstractKind::PrimaryKey => TypeRule::named("int"),
        AbstractKind::Float => TypeRule::named("float"),
        AbstractKind::Decimal => TypeRule::named("decimal"),
        AbstractKind::Datetime | AbstractKind::Timestamp => TypeRule::named("datetime"),
        AbstractKind::Time => TypeRule::named("time"),
        AbstractKind::Date => TypeRule::named("date"),
        AbstractKind::Binary => TypeRule::named("image"),
        AbstractKind::Boolean => TypeRule::named("bit"),
    })
});

/// Sybase dialect.
#[derive(Debug, Clone, Default)]
pub struct SybaseDialect {
    offset_strategy: OffsetStrategy,
}

impl SybaseDialect {
    /// Creates a dialect that skips rows with an exclusion subquery.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how offsets are applied.
    #[must_use]
    pub fn with_offset_strategy(mut self, strategy: OffsetStrategy) -> Self {
        self.offset_strategy = strategy;
        self
    }

    /// Returns the offset strategy.
    #[must_use]
    pub const fn offset_strategy(&self) -> &OffsetStrategy {
        &self.offset_strategy
    }
}

impl Dialect for SybaseDialect {
    fn name(&self) -> &'static str {
        "sybase"
    }

    fn family(&self) -> DialectFamily {
        DialectFamily::TopExclusion
    }

    fn type_table(&self) -> &TypeTable {
        &TYPES
    }

    /// Sybase keeps the case of quoted identifiers, so hyphenated names
    /// are quoted as spelled.
    fn quote_column_name(&self, name: &str) -> String {
        if name.contains('-') {
            format!("\"{name}\"")
        } else {
            name.to_string()
        }
    }

    fn add_limit_offset(
        &self,
        query: &QuerySpec,
        introspector: &dyn SchemaIntrospector,
    ) -> Result<RewriteResult> {
        exclusion::rewrite(query, &self.offset_strategy, introspector)
    }

    fn change_column_sql(&self, table: &str, column: &str, decl: &TypeDeclaration) -> String {
        format!(
            "ALTER TABLE {} MODIFY {} {decl}",
            self.quote_table_name(table),
            self.quote_column_name(column)
        )
    }

    fn change_column_default_sql(&self, table: &str, column: &str, default: &str) -> String {
        format!(
            "ALTER TABLE {} REPLACE {} DEFAULT {default}",
            self.quote_table_name(table),
            self.quote_column_name(column)
        )
    }

    fn rename_column_sql(&self, table: &str, old_name: &str, new_name: &str) -> String {
        format!(
            "EXEC sp_rename '{}.{}', '{}'",
            self.quote_string(table),
            self.quote_string(old_name),
            self.quote_string(new_name)
        )
    }

    fn rename_table_sql(&self, old_name: &str, new_name: &str) -> String {
        format!(
            "EXEC sp_rename '{}', '{}'",
            self.quote_string(old_name),
            self.quote_string(new_name)
        )
    }

    fn remove_index_sql(&self, table: &str, index_name: &str) -> String {
        format!("DROP INDEX {table}.{index_name}")
    }

    fn create_database_sql(&self, name: &str) -> Vec<String> {
        vec![format!("CREATE DATABASE {name}")]
    }

    fn drop_database_sql(&self, name: &str) -> Vec<String> {
        vec![format!("DROP DATABASE {name}")]
    }

    fn last_identity_query(&self) -> Option<&'static str> {
        Some("SELECT @@IDENTITY")
    }

    fn system_table_prefix(&self) -> &'static str {
        "sys"
    }
}
