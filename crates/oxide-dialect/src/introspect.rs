//! Reading an existing schema.
//!
//! The driver implements [`SchemaIntrospector`]; this module turns what it
//! reports into [`ColumnSpec`] values and screens out system tables.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::column::{AbstractKind, ColumnSpec, RawColumn};
use crate::dialect::Dialect;
use crate::error::{BoxError, DialectError, Result};
use crate::quote::unquote_string;

static LIMIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(\s*(\d+)").unwrap());
static PRECISION_SCALE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*(\d+)\s*(?:,\s*(\d+)\s*)?\)").unwrap());

/// Reads table and column metadata from a live database.
///
/// Implementations live with the driver.
pub trait SchemaIntrospector {
    /// Returns the columns of `table` in declaration order.
    fn columns(&self, table: &str) -> std::result::Result<Vec<RawColumn>, BoxError>;

    /// Returns every table name the connection can see.
    fn tables(&self) -> std::result::Result<Vec<String>, BoxError>;
}

/// Builds a [`ColumnSpec`] from an introspected column.
#[must_use]
pub fn interpret<D: Dialect + ?Sized>(dialect: &D, raw: &RawColumn) -> ColumnSpec {
    let kind = dialect.simplified_type(&raw.sql_type);
    let (limit, precision, scale) = match kind {
        AbstractKind::Decimal => {
            let (precision, scale) = extract_precision_scale(&raw.sql_type);
            (None, precision, scale)
        }
        AbstractKind::Integer | AbstractKind::Boolean => (None, None, None),
        _ => (dialect.extract_limit(&raw.sql_type), None, None),
    };

    ColumnSpec {
        name: raw.name.clone(),
        kind,
        limit,
        precision,
        scale,
        primary: raw.primary,
        identity: raw.identity,
        nullable: raw.nullable,
        default: raw
            .default
            .as_deref()
            .and_then(|default| dialect.parse_default(default)),
    }
}

/// Generic mapping from a declared SQL type to an abstract kind.
#[must_use]
pub fn generic_kind(sql_type: &str) -> AbstractKind {
    let ty = sql_type.to_lowercase();
    let has = |needle: &str| ty.contains(needle);

    if has("datetime") || has("timestamp") {
        AbstractKind::Datetime
    } else if has("date") {
        AbstractKind::Date
    } else if has("time") {
        AbstractKind::Time
    } else if has("int") {
        AbstractKind::Integer
    } else if has("decimal") || has("numeric") {
        match extract_precision_scale(&ty) {
            (_, Some(0)) => AbstractKind::Integer,
            _ => AbstractKind::Decimal,
        }
    } else if has("float") || has("double") || has("real") {
        AbstractKind::Float
    } else if has("clob") || has("text") {
        AbstractKind::Text
    } else if has("char") {
        AbstractKind::String
    } else if has("blob") || has("binary") || has("image") || has("bytea") {
        AbstractKind::Binary
    } else if has("bool") || ty.starts_with("bit") {
        AbstractKind::Boolean
    } else {
        AbstractKind::String
    }
}

/// First parenthesised number of a declared type, e.g. `255` in
/// `VARCHAR(255)`.
#[must_use]
pub fn extract_limit(sql_type: &str) -> Option<u32> {
    LIMIT
        .captures(sql_type)
        .and_then(|caps| caps[1].parse().ok())
}

/// Precision and scale of a declared type, e.g. `(10, 2)`.
#[must_use]
pub fn extract_precision_scale(sql_type: &str) -> (Option<u32>, Option<u32>) {
    PRECISION_SCALE.captures(sql_type).map_or((None, None), |caps| {
        (
            caps.get(1).and_then(|m| m.as_str().parse().ok()),
            caps.get(2).and_then(|m| m.as_str().parse().ok()),
        )
    })
}

/// Generic default value parsing: quoted literals are unwrapped, anything
/// else is kept as reported.
#[must_use]
pub fn generic_default(default: &str) -> Option<String> {
    let default = default.trim();
    if default.eq_ignore_ascii_case("null") {
        return None;
    }
    Some(unquote_string(default).unwrap_or_else(|| default.to_string()))
}

/// Drops system tables from a list of table names.
#[must_use]
pub fn filter_tables<D, I>(dialect: &D, names: I) -> Vec<String>
where
    D: Dialect + ?Sized,
    I: IntoIterator<Item = String>,
{
    names
        .into_iter()
        .filter(|name| {
            let system = dialect.is_system_table(name);
            if system {
                trace!(table = %name, "Skipping system table");
            }
            !system
        })
        .collect()
}

/// Lists the user tables visible through `introspector`.
///
/// # Errors
///
/// Returns [`DialectError::Introspection`] if the introspector fails.
pub fn tables<D: Dialect + ?Sized>(
    dialect: &D,
    introspector: &dyn SchemaIntrospector,
) -> Result<Vec<String>> {
    let names = introspector.tables().map_err(DialectError::Introspection)?;
    Ok(filter_tables(dialect, names))
}
