//! Generated key retrieval after INSERT.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::dialect::Dialect;
use crate::error::{BoxError, DialectError, Result};
use crate::quote::coerce_integer;
use crate::value::Value;

static INSERT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^\s*INSERT\b").unwrap());

/// Runs statements on a live connection.
///
/// The identity lookup relies on the executor issuing both statements on
/// the same session.
pub trait StatementExecutor {
    /// Whatever the driver returns for a statement.
    type Output;

    /// Executes a statement.
    fn execute(&self, sql: &str) -> std::result::Result<Self::Output, BoxError>;

    /// Executes a query and returns the first column of the first row.
    fn select_scalar(&self, sql: &str) -> std::result::Result<Value, BoxError>;
}

/// Result of [`execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutcome<T> {
    /// The executor's own result.
    Raw(T),
    /// The key generated by an INSERT.
    LastInsertId(i64),
}

/// Returns true if `sql` is an INSERT statement.
#[must_use]
pub fn is_insert(sql: &str) -> bool {
    INSERT.is_match(sql)
}

/// Executes `sql`; for INSERTs, returns the generated key instead of the
/// executor's result.
///
/// # Errors
///
/// Executor failures are wrapped in [`DialectError::Executor`]; an identity
/// value that is not an integer yields [`DialectError::ValueCoercion`].
pub fn execute<D, E>(dialect: &D, executor: &E, sql: &str) -> Result<ExecOutcome<E::Output>>
where
    D: Dialect + ?Sized,
    E: StatementExecutor + ?Sized,
{
    let output = executor.execute(sql).map_err(DialectError::Executor)?;
    if !is_insert(sql) {
        return Ok(ExecOutcome::Raw(output));
    }
    match last_insert_id(dialect, executor)? {
        Some(id) => Ok(ExecOutcome::LastInsertId(id)),
        None => Ok(ExecOutcome::Raw(output)),
    }
}

/// Queries the session's last generated key. `None` if the dialect has no
/// such query.
///
/// # Errors
///
/// See [`execute`].
pub fn last_insert_id<D, E>(dialect: &D, executor: &E) -> Result<Option<i64>>
where
    D: Dialect + ?Sized,
    E: StatementExecutor + ?Sized,
{
    let Some(query) = dialect.last_identity_query() else {
        return Ok(None);
    };
    let value = executor
        .select_scalar(query)
        .map_err(DialectError::Executor)?;
    let id = identity_value(&value)?;
    debug!(query = %query, id, "Fetched last insert id");
    Ok(Some(id))
}

fn identity_value(value: &Value) -> Result<i64> {
    match value {
        Value::Null => Ok(0),
        Value::Int(n) => Ok(*n),
        Value::Text(text) | Value::QuotedId(text) => coerce_integer(text),
        Value::Float(f) if f.fract().abs() < f64::EPSILON => coerce_integer(&format!("{f:.0}")),
        other => Err(DialectError::ValueCoercion {
            value: format!("{other:?}"),
            target: "identity",
        }),
    }
}
