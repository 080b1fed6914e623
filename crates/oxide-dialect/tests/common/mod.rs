#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use oxide_dialect::prelude::*;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Schema held in memory, keyed by table name.
#[derive(Default)]
pub struct MemorySchema {
    tables: Vec<(String, Vec<RawColumn>)>,
}

impl MemorySchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(mut self, name: &str, columns: Vec<RawColumn>) -> Self {
        self.tables.push((name.to_string(), columns));
        self
    }
}

impl SchemaIntrospector for MemorySchema {
    fn columns(&self, table: &str) -> std::result::Result<Vec<RawColumn>, BoxError> {
        self.tables
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(table))
            .map(|(_, columns)| columns.clone())
            .ok_or_else(|| format!("unknown table {table}").into())
    }

    fn tables(&self) -> std::result::Result<Vec<String>, BoxError> {
        Ok(self.tables.iter().map(|(name, _)| name.clone()).collect())
    }
}

pub fn widgets() -> MemorySchema {
    MemorySchema::new().table(
        "widgets",
        vec![
            RawColumn::new("id", "int").primary(),
            RawColumn::new("name", "varchar(40)"),
            RawColumn::new("price", "decimal(10,2)"),
        ],
    )
}

/// Executor that records statements and answers scalar queries from a map.
#[derive(Default)]
pub struct RecordingExecutor {
    pub executed: RefCell<Vec<String>>,
    pub scalars: HashMap<String, Value>,
    pub fail_on: Option<String>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scalar(mut self, sql: &str, value: Value) -> Self {
        self.scalars.insert(sql.to_string(), value);
        self
    }

    pub fn fail_on(mut self, sql: &str) -> Self {
        self.fail_on = Some(sql.to_string());
        self
    }
}

impl StatementExecutor for RecordingExecutor {
    type Output = u64;

    fn execute(&self, sql: &str) -> std::result::Result<u64, BoxError> {
        if self.fail_on.as_deref() == Some(sql) {
            return Err("statement rejected".into());
        }
        self.executed.borrow_mut().push(sql.to_string());
        Ok(1)
    }

    fn select_scalar(&self, sql: &str) -> std::result::Result<Value, BoxError> {
        if self.fail_on.as_deref() == Some(sql) {
            return Err("query rejected".into());
        }
        self.executed.borrow_mut().push(sql.to_string());
        Ok(self.scalars.get(sql).cloned().unwrap_or(Value::Null))
    }
}
