//! Effective ordering for windowed queries.

use tracing::warn;

use super::clause;
use crate::error::{DialectError, Result};
use crate::introspect::SchemaIntrospector;

/// Key column used when a table reports no columns at all.
const FALLBACK_KEY: &str = "id";

/// Picks the column that identifies rows of `table`.
///
/// Tries, in order: a primary key or identity column, a column named `id`
/// (any case, returned as spelled), then the first column. The later tiers
/// give a stable but possibly meaningless order; they never fail.
///
/// # Errors
///
/// Only introspection failures are returned.
pub fn determine_primary_key(table: &str, introspector: &dyn SchemaIntrospector) -> Result<String> {
    let columns = introspector
        .columns(table)
        .map_err(DialectError::Introspection)?;

    if let Some(column) = columns.iter().find(|c| c.primary || c.identity) {
        return Ok(column.name.clone());
    }

    if let Some(column) = columns
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(FALLBACK_KEY))
    {
        warn!(table = %table, column = %column.name, "No primary key, ordering by id column");
        return Ok(column.name.clone());
    }

    if let Some(column) = columns.first() {
        warn!(table = %table, column = %column.name, "No primary key or id column, ordering by first column");
        return Ok(column.name.clone());
    }

    warn!(table = %table, "Table reported no columns, assuming an id column");
    Ok(FALLBACK_KEY.to_string())
}

/// Returns `order` with `key` appended as a tie-breaker unless one of the
/// order's items already is the key.
///
/// Items are compared without their `ASC`/`DESC` direction and ignoring
/// case. An unqualified item matches the key's column name.
#[must_use]
pub fn with_tie_breaker(order: &str, key: &str) -> String {
    let column = key.rsplit('.').next().unwrap_or(key);
    let names_key = clause::split_list(order).into_iter().any(|item| {
        let expr = strip_direction(item);
        expr.eq_ignore_ascii_case(key) || expr.eq_ignore_ascii_case(column)
    });
    if names_key {
        order.to_string()
    } else {
        format!("{order}, {key}")
    }
}

fn strip_direction(item: &str) -> &str {
    let Some((expr, last)) = item.rsplit_once(char::is_whitespace) else {
        return item;
    };
    if last.eq_ignore_ascii_case("asc") || last.eq_ignore_ascii_case("desc") {
        expr.trim_end()
    } else {
        item
    }
}
