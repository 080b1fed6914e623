//! Prefix-window pagination: `SELECT LIMIT <offset> <limit> ...`.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{QuerySpec, RewriteResult, clause};
use crate::error::{DialectError, Result};

static LEADING_SELECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*SELECT\b\s*").unwrap());

/// Inserts the window clause right after the leading SELECT.
///
/// An offset without a limit uses `0` as the "no limit" sentinel, so an
/// explicit zero limit cannot be expressed in the prefix and gets an
/// always-false predicate instead. Without either, or with only a zero
/// offset, the statement is returned as is.
///
/// # Errors
///
/// Returns [`DialectError::UnrecognizedStatementShape`] when a window is
/// requested on a statement that does not start with SELECT.
pub fn rewrite(query: &QuerySpec) -> Result<RewriteResult> {
    let offset = query.offset.unwrap_or(0);
    let limit = match query.limit {
        Some(0) => {
            let sql = clause::suppress_rows(&query.sql)?;
            debug!(sql = %sql, "Suppressed all rows for zero limit");
            return Ok(RewriteResult::new(sql));
        }
        Some(limit) => limit,
        None if offset > 0 => 0,
        None => return Ok(RewriteResult::new(query.sql.clone())),
    };

    let select = LEADING_SELECT.find(&query.sql).ok_or_else(|| {
        DialectError::UnrecognizedStatementShape(format!(
            "window requires a leading SELECT: {}",
            query.sql
        ))
    })?;

    let sql = format!(
        "SELECT LIMIT {offset} {limit} {}",
        &query.sql[select.end()..]
    );
    debug!(offset, limit, sql = %sql, "Applied prefix window");
    Ok(RewriteResult::new(sql))
}
