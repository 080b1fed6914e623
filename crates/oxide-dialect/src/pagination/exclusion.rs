//! TOP-based pagination for dialects without OFFSET.
//!
//! A window `[offset, offset + limit)` becomes
//!
//! ```text
//! SELECT TOP <limit> ... WHERE <t>.<key> NOT IN
//!     (SELECT TOP <offset> <t>.<key> FROM ... ORDER BY <order>)
//! ORDER BY <order>
//! ```
//!
//! so the inner query names the rows to skip and the outer one takes the
//! next `limit` rows. An empty window gets an always-false predicate, since
//! `TOP 0` is not accepted everywhere.

use tracing::debug;

use super::{OffsetStrategy, QuerySpec, RewriteResult, StagedWindow, clause, order};
use crate::error::{DialectError, Result};
use crate::introspect::SchemaIntrospector;

/// Applies the window of `query`.
///
/// Without a limit the offset is ignored and the statement is returned
/// unchanged.
///
/// # Errors
///
/// Returns [`DialectError::UnrecognizedStatementShape`] when the statement
/// has no SELECT/FROM boundary, and introspection failures from key
/// discovery.
pub fn rewrite(
    query: &QuerySpec,
    strategy: &OffsetStrategy,
    introspector: &dyn SchemaIntrospector,
) -> Result<RewriteResult> {
    let Some(limit) = query.limit else {
        return Ok(RewriteResult::new(query.sql.clone()));
    };
    let offset = query.offset.unwrap_or(0);

    if limit == 0 {
        return suppress_rows(&query.sql);
    }
    if offset > 0 {
        if let OffsetStrategy::TempTable { table } = strategy {
            return stage(&query.sql, table, offset, limit);
        }
    }
    window(query, limit, offset, introspector)
}

/// Makes the statement return no rows while keeping it valid.
fn suppress_rows(sql: &str) -> Result<RewriteResult> {
    let rewritten = clause::suppress_rows(sql)?;
    debug!(sql = %rewritten, "Suppressed all rows for zero limit");
    Ok(RewriteResult::new(rewritten))
}

/// Redirects the rows into a staging table.
fn stage(sql: &str, table: &str, offset: u64, limit: u64) -> Result<RewriteResult> {
    let spans = clause::locate(sql)?;
    let rewritten = format!(
        "{} INTO {table} {}",
        sql[..spans.from].trim_end(),
        &sql[spans.from..]
    );
    debug!(table = %table, offset, limit, sql = %rewritten, "Staging rows for offset");
    Ok(RewriteResult::staged(
        rewritten,
        StagedWindow {
            table: table.to_string(),
            offset,
            limit,
        },
    ))
}

fn window(
    query: &QuerySpec,
    limit: u64,
    offset: u64,
    introspector: &dyn SchemaIntrospector,
) -> Result<RewriteResult> {
    let (body, own_order) = clause::split_order_by(&query.sql);
    let spans = clause::locate(&body)?;
    let select = &body[spans.select.clone()];
    let requested_order = query.order.clone().or(own_order);

    if offset == 0 {
        let order = match requested_order {
            Some(order) => order,
            None => qualified_key(&body, introspector)?,
        };
        let rewritten = format!(
            "{select} TOP {limit} {} ORDER BY {order}",
            body[spans.select.end..].trim()
        );
        debug!(limit, sql = %rewritten, "Applied TOP window");
        return Ok(RewriteResult::new(rewritten));
    }

    let key = qualified_key(&body, introspector)?;
    let order = requested_order.map_or_else(|| key.clone(), |o| order::with_tie_breaker(&o, &key));
    let excluded = format!(
        "{key} NOT IN ({select} TOP {offset} {key} {} ORDER BY {order})",
        body[spans.from..].trim()
    );
    let filtered = clause::with_predicate(&body, &spans, |existing| match existing {
        Some(cond) => format!("({cond}) AND {excluded}"),
        None => excluded.clone(),
    });
    let rewritten = format!(
        "{select} TOP {limit} {} ORDER BY {order}",
        filtered[spans.select.end..].trim()
    );
    debug!(limit, offset, sql = %rewritten, "Applied exclusion window");
    Ok(RewriteResult::new(rewritten))
}

/// `<table>.<key>` for the statement's target table.
fn qualified_key(sql: &str, introspector: &dyn SchemaIntrospector) -> Result<String> {
    let table = clause::table_name(sql).ok_or_else(|| {
        DialectError::UnrecognizedStatementShape(format!("no target table: {sql}"))
    })?;
    let key = order::determine_primary_key(&table, introspector)?;
    Ok(format!("{table}.{key}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::RawColumn;
    use crate::error::BoxError;

    struct Widgets;

    impl SchemaIntrospector for Widgets {
        fn columns(&self, _table: &str) -> std::result::Result<Vec<RawColumn>, BoxError> {
            Ok(vec![
                RawColumn::new("id", "int").primary(),
                RawColumn::new("name", "varchar(40)"),
            ])
        }

        fn tables(&self) -> std::result::Result<Vec<String>, BoxError> {
            Ok(vec!["widgets".to_string()])
        }
    }

    fn run(query: &QuerySpec) -> String {
        rewrite(query, &OffsetStrategy::ExclusionSubquery, &Widgets)
            .unwrap()
            .sql
    }

    #[test]
    fn test_general_window() {
        let q = QuerySpec::new("SELECT * FROM widgets").limit(5).offset(10);
        assert_eq!(
            run(&q),
            "SELECT TOP 5 * FROM widgets WHERE widgets.id NOT IN \
             (SELECT TOP 10 widgets.id FROM widgets ORDER BY widgets.id) \
             ORDER BY widgets.id"
        );
    }

    #[test]
    fn test_existing_where_is_and_ed() {
        let q = QuerySpec::new("SELECT name FROM widgets WHERE a = 1 OR b = 2")
            .limit(2)
            .offset(4)
            .order("name");
        assert_eq!(
            run(&q),
            "SELECT TOP 2 name FROM widgets WHERE (a = 1 OR b = 2) AND widgets.id NOT IN \
             (SELECT TOP 4 widgets.id FROM widgets WHERE a = 1 OR b = 2 ORDER BY name, widgets.id) \
             ORDER BY name, widgets.id"
        );
    }

    #[test]
    fn test_statement_order_is_reused() {
        let q = QuerySpec::new("SELECT * FROM widgets ORDER BY widgets.id DESC")
            .limit(1)
            .offset(1);
        assert_eq!(
            run(&q),
            "SELECT TOP 1 * FROM widgets WHERE widgets.id NOT IN \
             (SELECT TOP 1 widgets.id FROM widgets ORDER BY widgets.id DESC) \
             ORDER BY widgets.id DESC"
        );
    }

    #[test]
    fn test_first_row_needs_no_subquery() {
        let q = QuerySpec::new("SELECT * FROM widgets").limit(1);
        assert_eq!(run(&q), "SELECT TOP 1 * FROM widgets ORDER BY widgets.id");

        let q = QuerySpec::new("SELECT DISTINCT name FROM widgets")
            .limit(3)
            .offset(0)
            .order("name");
        assert_eq!(run(&q), "SELECT DISTINCT TOP 3 name FROM widgets ORDER BY name");
    }

    #[test]
    fn test_zero_limit_placements() {
        let q = QuerySpec::new("SELECT * FROM widgets WHERE a = 1 OR b = 2").limit(0);
        assert_eq!(
            run(&q),
            "SELECT * FROM widgets WHERE 1 = 2 AND (a = 1 OR b = 2)"
        );

        let q = QuerySpec::new("SELECT * FROM widgets ORDER BY name").limit(0).offset(3);
        assert_eq!(run(&q), "SELECT * FROM widgets WHERE 1 = 2 ORDER BY name");

        let q = QuerySpec::new("SELECT * FROM widgets").limit(0);
        assert_eq!(run(&q), "SELECT * FROM widgets WHERE 1 = 2");
    }

    #[test]
    fn test_offset_without_limit_is_ignored() {
        let q = QuerySpec::new("SELECT * FROM widgets").offset(3);
        assert_eq!(run(&q), "SELECT * FROM widgets");
    }

    #[test]
    fn test_temp_table_strategy() {
        let strategy = OffsetStrategy::TempTable {
            table: "#artemp".to_string(),
        };
        let q = QuerySpec::new("SELECT * FROM widgets WHERE a = 1").limit(5).offset(10);
        let result = rewrite(&q, &strategy, &Widgets).unwrap();
        assert_eq!(result.sql, "SELECT * INTO #artemp FROM widgets WHERE a = 1");
        assert_eq!(
            result.staging,
            Some(StagedWindow {
                table: "#artemp".to_string(),
                offset: 10,
                limit: 5,
            })
        );

        // No offset: plain TOP, nothing staged.
        let q = QuerySpec::new("SELECT * FROM widgets").limit(5);
        let result = rewrite(&q, &strategy, &Widgets).unwrap();
        assert!(result.staging.is_none());
        assert_eq!(result.sql, "SELECT TOP 5 * FROM widgets ORDER BY widgets.id");
    }

    #[test]
    fn test_unrecognized_shape() {
        let q = QuerySpec::new("EXEC sp_who").limit(5).offset(1);
        assert!(matches!(
            rewrite(&q, &OffsetStrategy::ExclusionSubquery, &Widgets),
            Err(DialectError::UnrecognizedStatementShape(_))
        ));
    }
}
