//! HSQLDB and H2 dialect.
//!
//! Both databases accept `SELECT LIMIT <offset> <limit> ...` and share most
//! of their type names. H2 differs in how it reports defaults, wants a
//! fixed float precision, and takes empty strings literally.

use std::sync::LazyLock;

use regex::Regex;

use super::{Dialect, DialectFamily};
use crate::column::AbstractKind;
use crate::error::Result;
use crate::introspect::{self, SchemaIntrospector};
use crate::pagination::{QuerySpec, RewriteResult, prefix};
use crate::types::{TypeDeclaration, TypeRule, TypeTable};

const PRIMARY_KEY: &str = "INTEGER GENERATED BY DEFAULT AS IDENTITY(START WITH 0) PRIMARY KEY";

static HSQLDB_TYPES: LazyLock<TypeTable> = LazyLock::new(|| type_table(HsqldbVariant::Hsqldb));
static H2_TYPES: LazyLock<TypeTable> = LazyLock::new(|| type_table(HsqldbVariant::H2));

static ZERO_LIMIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(\s*0\s*\)").unwrap());
static SEQUENCE_DEFAULT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\(\s*NEXT\s+VALUE\s+FOR").unwrap());

/// Which engine of the HSQLDB family is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HsqldbVariant {
    /// HyperSQL.
    #[default]
    Hsqldb,
    /// H2.
    H2,
}

fn type_table(variant: HsqldbVariant) -> TypeTable {
    TypeTable::new(PRIMARY_KEY, |kind| match kind {
        AbstractKind::String => TypeRule::limited("VARCHAR", 255),
        AbstractKind::Text => TypeRule::named("LONGVARCHAR"),
        AbstractKind::Integer | AbstractKind::PrimaryKey => TypeRule::named("INTEGER"),
        AbstractKind::Float => match variant {
            HsqldbVariant::Hsqldb => TypeRule::named("REAL"),
            HsqldbVariant::H2 => TypeRule::limited("FLOAT", 17),
        },
        AbstractKind::Decimal => TypeRule::named("DECIMAL"),
        AbstractKind::Datetime | AbstractKind::Timestamp => TypeRule::named("DATETIME"),
        AbstractKind::Time => TypeRule::named("TIME"),
        AbstractKind::Date => TypeRule::named("DATE"),
        AbstractKind::Binary => TypeRule::named("LONGVARBINARY"),
        AbstractKind::Boolean => TypeRule::named("TINYINT"),
    })
}

/// HSQLDB/H2 dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct HsqldbDialect {
    variant: HsqldbVariant,
}

impl HsqldbDialect {
    /// Creates a dialect for the given variant.
    #[must_use]
    pub const fn new(variant: HsqldbVariant) -> Self {
        Self { variant }
    }

    /// HyperSQL.
    #[must_use]
    pub const fn hsqldb() -> Self {
        Self::new(HsqldbVariant::Hsqldb)
    }

    /// H2.
    #[must_use]
    pub const fn h2() -> Self {
        Self::new(HsqldbVariant::H2)
    }

    /// Returns the variant.
    #[must_use]
    pub const fn variant(&self) -> HsqldbVariant {
        self.variant
    }
}

impl Dialect for HsqldbDialect {
    fn name(&self) -> &'static str {
        match self.variant {
            HsqldbVariant::Hsqldb => "hsqldb",
            HsqldbVariant::H2 => "h2",
        }
    }

    fn family(&self) -> DialectFamily {
        DialectFamily::PrefixWindow
    }

    fn type_table(&self) -> &TypeTable {
        match self.variant {
            HsqldbVariant::Hsqldb => &HSQLDB_TYPES,
            HsqldbVariant::H2 => &H2_TYPES,
        }
    }

    fn quotes_empty_string_directly(&self) -> bool {
        self.variant == HsqldbVariant::H2
    }

    fn simplified_type(&self, sql_type: &str) -> AbstractKind {
        let ty = sql_type.to_lowercase();
        if ty.contains("longvarchar") {
            AbstractKind::Text
        } else if ty.contains("tinyint") {
            AbstractKind::Boolean
        } else if ty.contains("real") {
            AbstractKind::Float
        } else {
            introspect::generic_kind(sql_type)
        }
    }

    fn extract_limit(&self, sql_type: &str) -> Option<u32> {
        // LONGVARCHAR columns come back as LONGVARCHAR(0).
        if ZERO_LIMIT.is_match(sql_type) {
            return None;
        }
        introspect::extract_limit(sql_type)
    }

    fn parse_default(&self, default: &str) -> Option<String> {
        if SEQUENCE_DEFAULT.is_match(default.trim()) {
            return None;
        }
        introspect::generic_default(default)
    }

    fn add_limit_offset(
        &self,
        query: &QuerySpec,
        _introspector: &dyn SchemaIntrospector,
    ) -> Result<RewriteResult> {
        prefix::rewrite(query)
    }

    fn change_column_sql(&self, table: &str, column: &str, decl: &TypeDeclaration) -> String {
        format!(
            "ALTER TABLE {} ALTER COLUMN {} {decl}",
            self.quote_table_name(table),
            self.quote_column_name(column)
        )
    }

    fn change_column_default_sql(&self, table: &str, column: &str, default: &str) -> String {
        format!(
            "ALTER TABLE {} ALTER COLUMN {} SET DEFAULT {default}",
            self.quote_table_name(table),
            self.quote_column_name(column)
        )
    }

    fn rename_column_sql(&self, table: &str, old_name: &str, new_name: &str) -> String {
        format!(
            "ALTER TABLE {} ALTER COLUMN {} RENAME TO {}",
            self.quote_table_name(table),
            self.quote_column_name(old_name),
            self.quote_column_name(new_name)
        )
    }

    fn rename_table_sql(&self, old_name: &str, new_name: &str) -> String {
        format!(
            "ALTER TABLE {} RENAME TO {}",
            self.quote_table_name(old_name),
            self.quote_table_name(new_name)
        )
    }

    fn remove_index_sql(&self, _table: &str, index_name: &str) -> String {
        format!("DROP INDEX {}", self.quote_column_name(index_name))
    }

    fn create_database_sql(&self, _name: &str) -> Vec<String> {
        // The database is created when the first connection opens it.
        Vec::new()
    }

    fn drop_database_sql(&self, _name: &str) -> Vec<String> {
        vec![String::from("DROP ALL OBJECTS")]
    }

    fn last_identity_query(&self) -> Option<&'static str> {
        Some("CALL IDENTITY()")
    }

    fn system_table_prefix(&self) -> &'static str {
        "system_"
    }
}
