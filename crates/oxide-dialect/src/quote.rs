//! Literal and identifier quoting.

use crate::column::{AbstractKind, ColumnSpec};
use crate::dialect::Dialect;
use crate::error::{DialectError, Result};
use crate::value::Value;

/// Renders `value` as a SQL literal for `dialect`.
///
/// The optional column steers how text is rendered: binary columns get a
/// hex literal, boolean columns get the dialect's boolean tokens, integer
/// columns and non-textual primary keys get a bare numeral (drivers and
/// schema defaults hand these back as text).
///
/// # Errors
///
/// Returns [`DialectError::ValueCoercion`] when text bound for an integer
/// or boolean column does not parse, and for NaN or infinite floats.
pub fn quote<D: Dialect + ?Sized>(
    dialect: &D,
    value: &Value,
    column: Option<&ColumnSpec>,
) -> Result<String> {
    let sql = match value {
        Value::QuotedId(quoted) => quoted.clone(),
        Value::Null => String::from("NULL"),
        Value::Bool(true) => dialect.quoted_true().to_string(),
        Value::Bool(false) => dialect.quoted_false().to_string(),
        Value::Int(n) => n.to_string(),
        Value::Float(f) if f.is_finite() => f.to_string(),
        Value::Float(f) => {
            return Err(DialectError::ValueCoercion {
                value: f.to_string(),
                target: "finite number",
            });
        }
        Value::Binary(bytes) => hex_literal(bytes),
        Value::Timestamp(ts) => format!("'{}'", ts.format("%Y-%m-%d %H:%M:%S%.f")),
        Value::Date(date) => format!("'{}'", date.format("%Y-%m-%d")),
        Value::Text(text) => quote_text(dialect, text, column)?,
    };
    Ok(sql)
}

fn quote_text<D: Dialect + ?Sized>(
    dialect: &D,
    text: &str,
    column: Option<&ColumnSpec>,
) -> Result<String> {
    if text.is_empty() && dialect.quotes_empty_string_directly() {
        return Ok(String::from("''"));
    }
    match column {
        Some(col) if col.kind == AbstractKind::Binary => Ok(hex_literal(text.as_bytes())),
        Some(col) if col.kind == AbstractKind::Boolean => {
            let token = if coerce_boolean(text)? {
                dialect.quoted_true()
            } else {
                dialect.quoted_false()
            };
            Ok(token.to_string())
        }
        Some(col) if wants_integer(col) => Ok(coerce_integer(text)?.to_string()),
        _ => Ok(format!("'{}'", dialect.quote_string(text))),
    }
}

fn wants_integer(column: &ColumnSpec) -> bool {
    column.kind == AbstractKind::Integer || (column.primary && !column.is_textual())
}

/// Parses text as an integer, ignoring surrounding whitespace.
///
/// # Errors
///
/// Returns [`DialectError::ValueCoercion`] if the text is not an integer.
pub fn coerce_integer(text: &str) -> Result<i64> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| DialectError::ValueCoercion {
            value: text.to_string(),
            target: "integer",
        })
}

/// Parses boolean text: `true`/`false`, `t`/`f`, `yes`/`no` or `1`/`0`,
/// in any case.
///
/// # Errors
///
/// Returns [`DialectError::ValueCoercion`] for anything else.
pub fn coerce_boolean(text: &str) -> Result<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" | "y" | "yes" => Ok(true),
        "0" | "f" | "false" | "n" | "no" => Ok(false),
        _ => Err(DialectError::ValueCoercion {
            value: text.to_string(),
            target: "boolean",
        }),
    }
}

fn hex_literal(bytes: &[u8]) -> String {
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("X'{hex}'")
}

/// Doubles every single quote.
#[must_use]
pub fn escape_string(text: &str) -> String {
    text.replace('\'', "''")
}

/// Inverse of a quoted string literal: strips the outer quotes and
/// collapses doubled quotes. Returns `None` if `literal` is not quoted.
#[must_use]
pub fn unquote_string(literal: &str) -> Option<String> {
    let inner = literal.strip_prefix('\'')?.strip_suffix('\'')?;
    Some(inner.replace("''", "'"))
}

/// Quotes an identifier that cannot appear bare.
///
/// Names containing a hyphen are upper-cased (the server folds quoted
/// names) and wrapped in double quotes; all other names pass through.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    if name.contains('-') {
        format!("\"{}\"", name.to_uppercase())
    } else {
        name.to_string()
    }
}
