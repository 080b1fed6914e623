//! Pagination emulation.
//!
//! Neither family of supported databases understands `LIMIT ... OFFSET`.
//! The rewriters in this module turn a plain SELECT plus a requested
//! window into an equivalent statement built from what the target does
//! support:
//!
//! - [`prefix`]: `SELECT LIMIT <offset> <limit> ...` (HSQLDB, H2)
//! - [`exclusion`]: `TOP`, a `NOT IN` exclusion subquery, an always-false
//!   predicate for empty windows, or staging into a temp table (Sybase)
//!
//! All rewriting is textual. [`clause::locate`] is the only place that
//! looks for clause boundaries.

pub mod clause;
pub mod exclusion;
pub mod order;
pub mod prefix;

use serde::{Deserialize, Serialize};

/// A statement together with the window the caller wants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    /// Raw statement text.
    pub sql: String,
    /// Maximum number of rows.
    pub limit: Option<u64>,
    /// Rows to skip.
    pub offset: Option<u64>,
    /// Caller supplied ordering, without the `ORDER BY` keyword.
    pub order: Option<String>,
}

impl QuerySpec {
    /// Creates an unbounded query.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            limit: None,
            offset: None,
            order: None,
        }
    }

    /// Sets the limit.
    #[must_use]
    pub const fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the offset.
    #[must_use]
    pub const fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the ordering (e.g. `name DESC`).
    #[must_use]
    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }
}

/// How a TOP-only dialect skips the first rows of a window.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum OffsetStrategy {
    /// Exclude the first rows with a `NOT IN (SELECT TOP <offset> ...)`
    /// subquery keyed on the table's primary key.
    #[default]
    ExclusionSubquery,
    /// Select `INTO` a staging table; the executor reads the window from it.
    TempTable {
        /// Staging table name, e.g. `#artemp`.
        table: String,
    },
}

/// Rows the executor must read back from a staging table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedWindow {
    /// Staging table the statement selects into.
    pub table: String,
    /// Rows to skip.
    pub offset: u64,
    /// Rows to return.
    pub limit: u64,
}

/// The statement to execute in place of the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult {
    /// Statement text.
    pub sql: String,
    /// Set when the rows are staged instead of returned.
    pub staging: Option<StagedWindow>,
}

impl RewriteResult {
    /// A result that returns rows directly.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            staging: None,
        }
    }

    /// A result that stages rows into a table.
    #[must_use]
    pub fn staged(sql: impl Into<String>, window: StagedWindow) -> Self {
        Self {
            sql: sql.into(),
            staging: Some(window),
        }
    }
}
