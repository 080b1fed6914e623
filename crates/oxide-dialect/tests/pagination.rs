//! Pagination rewriting through configured dialects.

mod common;
use common::*;

use oxide_dialect::prelude::*;

fn sybase() -> Box<dyn Dialect> {
    DialectConfig::new(DialectKind::Sybase).build().unwrap()
}

fn rewrite(dialect: &dyn Dialect, query: &QuerySpec) -> String {
    dialect.add_limit_offset(query, &widgets()).unwrap().sql
}

#[test]
fn widgets_window_excludes_first_rows_by_primary_key() {
    init_tracing();
    let query = QuerySpec::new("SELECT * FROM widgets").limit(5).offset(10);
    assert_eq!(
        rewrite(sybase().as_ref(), &query),
        "SELECT TOP 5 * FROM widgets WHERE widgets.id NOT IN \
         (SELECT TOP 10 widgets.id FROM widgets ORDER BY widgets.id) ORDER BY widgets.id"
    );
}

#[test]
fn window_sizes_appear_in_top_clauses() {
    let dialect = sybase();
    for limit in 1..4_u64 {
        for offset in 1..4_u64 {
            let query = QuerySpec::new("SELECT name FROM widgets").limit(limit).offset(offset);
            let sql = rewrite(dialect.as_ref(), &query);
            assert!(sql.starts_with(&format!("SELECT TOP {limit} name FROM widgets WHERE ")));
            assert!(sql.contains(&format!("NOT IN (SELECT TOP {offset} widgets.id FROM widgets")));
        }
    }
}

#[test]
fn zero_limit_always_suppresses_rows() {
    let dialect = sybase();
    let statements = [
        "SELECT * FROM widgets",
        "SELECT * FROM widgets WHERE name = 'a' OR name = 'b'",
        "SELECT * FROM widgets ORDER BY name",
        "SELECT name, COUNT(*) FROM widgets GROUP BY name",
    ];
    for sql in statements {
        for offset in [None, Some(0), Some(7)] {
            let mut query = QuerySpec::new(sql).limit(0);
            query.offset = offset;
            let rewritten = rewrite(dialect.as_ref(), &query);
            assert!(
                rewritten.contains("WHERE 1 = 2"),
                "{rewritten} does not suppress rows"
            );
            assert!(!rewritten.contains("TOP"), "{rewritten} uses TOP");
        }
    }
    assert_eq!(
        rewrite(
            dialect.as_ref(),
            &QuerySpec::new("SELECT name, COUNT(*) FROM widgets GROUP BY name").limit(0)
        ),
        "SELECT name, COUNT(*) FROM widgets WHERE 1 = 2 GROUP BY name"
    );
}

#[test]
fn zero_limit_suppresses_rows_on_prefix_dialects() {
    for kind in [DialectKind::Hsqldb, DialectKind::H2] {
        let dialect = DialectConfig::new(kind).build().unwrap();
        for offset in [None, Some(0), Some(3)] {
            let mut query = QuerySpec::new("SELECT * FROM widgets").limit(0);
            query.offset = offset;
            assert_eq!(
                rewrite(dialect.as_ref(), &query),
                "SELECT * FROM widgets WHERE 1 = 2"
            );
        }
        // Offset alone still means "skip, then no limit".
        assert_eq!(
            rewrite(dialect.as_ref(), &QuerySpec::new("SELECT * FROM widgets").offset(3)),
            "SELECT LIMIT 3 0 * FROM widgets"
        );
    }
}

#[test]
fn order_on_a_similar_column_still_gets_the_key() {
    let query = QuerySpec::new("SELECT * FROM widgets")
        .limit(2)
        .offset(2)
        .order("widgets.id_group");
    assert_eq!(
        rewrite(sybase().as_ref(), &query),
        "SELECT TOP 2 * FROM widgets WHERE widgets.id NOT IN \
         (SELECT TOP 2 widgets.id FROM widgets ORDER BY widgets.id_group, widgets.id) \
         ORDER BY widgets.id_group, widgets.id"
    );
}

#[test]
fn first_row_window_takes_no_subquery() {
    let query = QuerySpec::new("SELECT * FROM widgets WHERE price > 3").limit(1).offset(0);
    assert_eq!(
        rewrite(sybase().as_ref(), &query),
        "SELECT TOP 1 * FROM widgets WHERE price > 3 ORDER BY widgets.id"
    );
}

#[test]
fn caller_order_overrides_statement_order() {
    let query = QuerySpec::new("SELECT * FROM widgets ORDER BY price")
        .limit(2)
        .offset(2)
        .order("name DESC");
    assert_eq!(
        rewrite(sybase().as_ref(), &query),
        "SELECT TOP 2 * FROM widgets WHERE widgets.id NOT IN \
         (SELECT TOP 2 widgets.id FROM widgets ORDER BY name DESC, widgets.id) \
         ORDER BY name DESC, widgets.id"
    );
}

#[test]
fn key_discovery_falls_back_to_id_column() {
    let schema = MemorySchema::new().table(
        "legacy",
        vec![
            RawColumn::new("label", "varchar(10)"),
            RawColumn::new("Id", "int"),
        ],
    );
    let query = QuerySpec::new("SELECT * FROM legacy").limit(3).offset(3);
    let sql = sybase().add_limit_offset(&query, &schema).unwrap().sql;
    assert!(sql.contains("legacy.Id NOT IN (SELECT TOP 3 legacy.Id FROM legacy ORDER BY legacy.Id)"));
}

#[test]
fn introspection_failure_propagates() {
    let query = QuerySpec::new("SELECT * FROM missing").limit(3).offset(3);
    let err = sybase().add_limit_offset(&query, &widgets()).unwrap_err();
    assert!(matches!(err, DialectError::Introspection(_)));
}

#[test]
fn temp_table_strategy_stages_offset_windows() {
    let dialect = DialectConfig::new(DialectKind::Sybase)
        .offset_strategy(OffsetStrategy::TempTable {
            table: "#artemp".to_string(),
        })
        .build()
        .unwrap();
    let result = dialect
        .add_limit_offset(
            &QuerySpec::new("SELECT * FROM widgets").limit(5).offset(10),
            &widgets(),
        )
        .unwrap();
    assert_eq!(result.sql, "SELECT * INTO #artemp FROM widgets");
    let staged = result.staging.unwrap();
    assert_eq!((staged.offset, staged.limit), (10, 5));

    // Zero limit wins over staging.
    let result = dialect
        .add_limit_offset(
            &QuerySpec::new("SELECT * FROM widgets").limit(0).offset(10),
            &widgets(),
        )
        .unwrap();
    assert!(result.staging.is_none());
    assert_eq!(result.sql, "SELECT * FROM widgets WHERE 1 = 2");
}

#[test]
fn prefix_dialects_ignore_introspection() {
    for kind in [DialectKind::Hsqldb, DialectKind::H2] {
        let dialect = DialectConfig::new(kind).build().unwrap();
        let query = QuerySpec::new("SELECT * FROM missing").limit(5).offset(10);
        assert_eq!(
            dialect.add_limit_offset(&query, &MemorySchema::new()).unwrap().sql,
            "SELECT LIMIT 10 5 * FROM missing"
        );
    }
}

#[test]
fn unrecognized_statements_are_rejected() {
    let query = QuerySpec::new("EXEC report_proc").limit(5).offset(5);
    assert!(matches!(
        sybase().add_limit_offset(&query, &widgets()),
        Err(DialectError::UnrecognizedStatementShape(_))
    ));

    let hsqldb = DialectConfig::new(DialectKind::Hsqldb).build().unwrap();
    assert!(matches!(
        hsqldb.add_limit_offset(&query, &widgets()),
        Err(DialectError::UnrecognizedStatementShape(_))
    ));
}
