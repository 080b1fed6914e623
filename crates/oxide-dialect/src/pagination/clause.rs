//! Locating SELECT/FROM/WHERE/ORDER BY boundaries in statement text.
//!
//! This is pattern matching, not parsing. Keywords only count when they
//! appear outside string literals, quoted identifiers and parentheses, so
//! subqueries and literals such as `'order by'` do not confuse the
//! rewriters. Anything beyond a single top-level SELECT is unsupported.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{DialectError, Result};

static SELECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bSELECT(?:\s+DISTINCT)?\b").unwrap());
static FROM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bFROM\b").unwrap());
static WHERE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bWHERE\b").unwrap());
static GROUP_BY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bGROUP\s+BY\b").unwrap());
static HAVING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bHAVING\b").unwrap());
static ORDER_BY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bORDER\s+BY\b").unwrap());

static FROM_TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bFROM\s+([^(\s,]+)").unwrap());
static DML_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:INSERT\s+INTO|UPDATE)\s+([^(\s,]+)").unwrap()
});

/// Byte offsets of the clauses of a single SELECT statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseSpans {
    /// `SELECT` or `SELECT DISTINCT` keyword.
    pub select: Range<usize>,
    /// Start of the `FROM` keyword.
    pub from: usize,
    /// The `WHERE` keyword.
    pub where_keyword: Option<Range<usize>>,
    /// Start of `GROUP BY`.
    pub group_by: Option<usize>,
    /// Start of `HAVING`.
    pub having: Option<usize>,
    /// Start of `ORDER BY`.
    pub order_by: Option<usize>,
    len: usize,
}

impl ClauseSpans {
    /// Start of the first clause that follows the WHERE predicate, or the
    /// end of the statement.
    #[must_use]
    pub fn tail_start(&self) -> usize {
        let after = self
            .where_keyword
            .as_ref()
            .map_or(self.from, |kw| kw.end);
        [self.group_by, self.having, self.order_by]
            .into_iter()
            .flatten()
            .filter(|pos| *pos >= after)
            .min()
            .unwrap_or(self.len)
    }

    /// Span of the WHERE predicate, without the keyword.
    #[must_use]
    pub fn where_condition(&self) -> Option<Range<usize>> {
        self.where_keyword
            .as_ref()
            .map(|kw| kw.end..self.tail_start())
    }
}

/// Finds the clause boundaries of `sql`.
///
/// # Errors
///
/// Returns [`DialectError::UnrecognizedStatementShape`] when there is no
/// top-level SELECT followed by a FROM.
pub fn locate(sql: &str) -> Result<ClauseSpans> {
    let top = top_level_mask(sql);

    let select = first_top_level(&SELECT, sql, &top, 0)
        .ok_or_else(|| unrecognized("no SELECT", sql))?;
    let from = first_top_level(&FROM, sql, &top, select.end)
        .ok_or_else(|| unrecognized("no FROM after SELECT", sql))?
        .start;

    Ok(ClauseSpans {
        where_keyword: first_top_level(&WHERE, sql, &top, from),
        group_by: first_top_level(&GROUP_BY, sql, &top, from).map(|m| m.start),
        having: first_top_level(&HAVING, sql, &top, from).map(|m| m.start),
        order_by: first_top_level(&ORDER_BY, sql, &top, from).map(|m| m.start),
        select,
        from,
        len: sql.len(),
    })
}

/// Rebuilds `sql` with its WHERE predicate replaced by `build(existing)`.
///
/// `existing` is the current predicate, trimmed. When there is none, the
/// new WHERE clause goes in front of GROUP BY, HAVING or ORDER BY, or at
/// the end of the statement.
pub fn with_predicate(
    sql: &str,
    spans: &ClauseSpans,
    build: impl FnOnce(Option<&str>) -> String,
) -> String {
    let (head, predicate, tail) = match spans.where_condition() {
        Some(cond) => (
            &sql[..cond.start],
            build(Some(sql[cond.clone()].trim())),
            &sql[cond.end..],
        ),
        None => {
            let at = spans.tail_start();
            let head = format!("{} WHERE", sql[..at].trim_end());
            return join(&head, &build(None), &sql[at..]);
        }
    };
    join(head, &predicate, tail)
}

fn join(head: &str, predicate: &str, tail: &str) -> String {
    let tail = tail.trim();
    if tail.is_empty() {
        format!("{} {predicate}", head.trim_end())
    } else {
        format!("{} {predicate} {tail}", head.trim_end())
    }
}

/// Adds an always-false predicate so the statement returns no rows while
/// staying valid.
///
/// # Errors
///
/// See [`locate`].
pub fn suppress_rows(sql: &str) -> Result<String> {
    let spans = locate(sql)?;
    Ok(with_predicate(sql, &spans, |existing| match existing {
        Some(cond) => format!("1 = 2 AND ({cond})"),
        None => String::from("1 = 2"),
    }))
}

/// Splits a list such as an ORDER BY clause on top-level commas.
#[must_use]
pub fn split_list(list: &str) -> Vec<&str> {
    let top = top_level_mask(list);
    let mut items = Vec::new();
    let mut start = 0;
    for (i, c) in list.char_indices() {
        if c == ',' && top[i] {
            items.push(list[start..i].trim());
            start = i + 1;
        }
    }
    items.push(list[start..].trim());
    items.retain(|item| !item.is_empty());
    items
}

/// Splits off a top-level trailing `ORDER BY`.
///
/// Returns the statement without it and the ordering expression.
#[must_use]
pub fn split_order_by(sql: &str) -> (String, Option<String>) {
    let top = top_level_mask(sql);
    match first_top_level(&ORDER_BY, sql, &top, 0) {
        Some(m) => {
            let order = sql[m.end..].trim();
            let order = (!order.is_empty()).then(|| order.to_string());
            (sql[..m.start].trim_end().to_string(), order)
        }
        None => (sql.trim_end().to_string(), None),
    }
}

/// Returns the table a statement targets: the INSERT/UPDATE target, or
/// the first table after FROM.
#[must_use]
pub fn table_name(sql: &str) -> Option<String> {
    if let Some(caps) = DML_TARGET.captures(sql) {
        return Some(caps[1].to_string());
    }
    let top = top_level_mask(sql);
    FROM_TABLE
        .captures_iter(sql)
        .find(|caps| caps.get(0).is_some_and(|m| top[m.start()]))
        .map(|caps| caps[1].to_string())
}

fn unrecognized(reason: &str, sql: &str) -> DialectError {
    DialectError::UnrecognizedStatementShape(format!("{reason}: {sql}"))
}

fn first_top_level(re: &Regex, sql: &str, top: &[bool], after: usize) -> Option<Range<usize>> {
    re.find_iter(sql)
        .find(|m| m.start() >= after && top[m.start()])
        .map(|m| m.range())
}

/// Marks every byte that sits outside quotes and parentheses.
fn top_level_mask(sql: &str) -> Vec<bool> {
    let mut mask = vec![false; sql.len() + 1];
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for (i, c) in sql.char_indices() {
        let top = quote.is_none() && depth == 0;
        mask[i..i + c.len_utf8()].fill(top);
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '\'' | '"' => quote = Some(c),
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                _ => {}
            },
        }
    }
    mask[sql.len()] = quote.is_none() && depth == 0;
    mask
}
