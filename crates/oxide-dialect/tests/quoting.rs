//! Literal quoting across dialects.

mod common;

use chrono::NaiveDate;
use oxide_dialect::prelude::*;
use oxide_dialect::quote::unquote_string;

fn dialects() -> Vec<Box<dyn Dialect>> {
    [DialectKind::Hsqldb, DialectKind::H2, DialectKind::Sybase]
        .into_iter()
        .map(|kind| DialectConfig::new(kind).build().unwrap())
        .collect()
}

#[test]
fn quoted_strings_unquote_to_the_original() {
    common::init_tracing();
    let samples = ["plain", "it's", "''", "a'b'c", " spaced ", "O'Reilly's"];
    for dialect in dialects() {
        for sample in samples {
            let quoted = dialect.quote(&Value::from(sample), None).unwrap();
            assert_eq!(
                unquote_string(&quoted).as_deref(),
                Some(sample),
                "{} round trip of {sample:?}",
                dialect.name()
            );
        }
    }
}

#[test]
fn empty_strings() {
    for dialect in dialects() {
        assert_eq!(dialect.quote(&Value::from(""), None).unwrap(), "''");
    }
    let h2 = HsqldbDialect::h2();
    let id = ColumnSpec::new("id", AbstractKind::Integer);
    // H2 takes the empty string as is, even for integer columns.
    assert_eq!(h2.quote(&Value::from(""), Some(&id)).unwrap(), "''");
    assert!(matches!(
        HsqldbDialect::hsqldb().quote(&Value::from(""), Some(&id)),
        Err(DialectError::ValueCoercion { .. })
    ));
}

#[test]
fn booleans_and_binary() {
    for dialect in dialects() {
        assert_eq!(dialect.quote(&Value::Bool(true), None).unwrap(), "1");
        assert_eq!(dialect.quote(&Value::Bool(false), None).unwrap(), "0");
        assert_eq!(
            dialect.quote(&Value::Binary(vec![0xde, 0xad]), None).unwrap(),
            "X'dead'"
        );
    }
}

#[test]
fn boolean_columns_take_dialect_tokens() {
    let active = ColumnSpec::new("active", AbstractKind::Boolean);
    for dialect in dialects() {
        assert_eq!(dialect.quote(&Value::from("true"), Some(&active)).unwrap(), "1");
        assert_eq!(dialect.quote(&Value::from("0"), Some(&active)).unwrap(), "0");
    }
}

#[test]
fn non_finite_floats_are_rejected() {
    for dialect in dialects() {
        for f in [f64::NAN, f64::INFINITY] {
            assert!(matches!(
                dialect.quote(&Value::Float(f), None),
                Err(DialectError::ValueCoercion { .. })
            ));
        }
        assert_eq!(dialect.quote(&Value::Float(2.5), None).unwrap(), "2.5");
    }
}

#[test]
fn column_context_steers_text() {
    let dialect = SybaseDialect::new();
    let key = ColumnSpec::new("id", AbstractKind::PrimaryKey);
    assert_eq!(dialect.quote(&Value::from(" 12 "), Some(&key)).unwrap(), "12");

    let name = ColumnSpec::new("code", AbstractKind::String).primary();
    assert_eq!(dialect.quote(&Value::from("12"), Some(&name)).unwrap(), "'12'");

    let blob = ColumnSpec::new("data", AbstractKind::Binary);
    assert_eq!(dialect.quote(&Value::from("ab"), Some(&blob)).unwrap(), "X'6162'");
}

#[test]
fn dates_and_identifiers() {
    let dialect = HsqldbDialect::hsqldb();
    let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    assert_eq!(dialect.quote(&Value::Date(date), None).unwrap(), "'2024-02-29'");
    assert_eq!(
        dialect.quote(&Value::QuotedId("NOW()".to_string()), None).unwrap(),
        "NOW()"
    );
    assert_eq!(dialect.quote_column_name("first-name"), "\"FIRST-NAME\"");
    assert_eq!(dialect.quote_column_name("name"), "name");

    let sybase = SybaseDialect::new();
    assert_eq!(sybase.quote_column_name("first-Name"), "\"first-Name\"");
}
