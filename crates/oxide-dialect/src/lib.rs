//! # oxide-dialect
//!
//! SQL dialect adapters for databases that lack `LIMIT ... OFFSET` or
//! diverge from the usual type names, quoting and identity semantics:
//! HSQLDB, H2 and Sybase.
//!
//! This crate provides:
//! - Pagination emulation: prefix windows (`SELECT LIMIT o l`) and
//!   `TOP` with exclusion subqueries, always-false predicates or staging
//! - Literal and identifier quoting per dialect
//! - Abstract column kinds mapped to native types, and back
//! - DDL statements for column, table, index and database changes
//! - Generated key retrieval after INSERT
//!
//! Everything here builds SQL text. Running it is left to a
//! [`StatementExecutor`] and schema metadata comes from a
//! [`SchemaIntrospector`], both implemented by the driver.
//!
//! ## Pagination
//!
//! ```rust
//! use oxide_dialect::prelude::*;
//!
//! struct Widgets;
//!
//! impl SchemaIntrospector for Widgets {
//!     fn columns(&self, _table: &str) -> std::result::Result<Vec<RawColumn>, BoxError> {
//!         Ok(vec![RawColumn::new("id", "int").primary()])
//!     }
//!
//!     fn tables(&self) -> std::result::Result<Vec<String>, BoxError> {
//!         Ok(vec!["widgets".to_string()])
//!     }
//! }
//!
//! let query = QuerySpec::new("SELECT * FROM widgets").limit(5).offset(10);
//!
//! let sql = HsqldbDialect::hsqldb().add_limit_offset(&query, &Widgets).unwrap().sql;
//! assert_eq!(sql, "SELECT LIMIT 10 5 * FROM widgets");
//!
//! let sql = SybaseDialect::new().add_limit_offset(&query, &Widgets).unwrap().sql;
//! assert_eq!(
//!     sql,
//!     "SELECT TOP 5 * FROM widgets WHERE widgets.id NOT IN \
//!      (SELECT TOP 10 widgets.id FROM widgets ORDER BY widgets.id) ORDER BY widgets.id"
//! );
//! ```

pub mod column;
pub mod config;
pub mod ddl;
pub mod dialect;
pub mod error;
pub mod identity;
pub mod introspect;
pub mod pagination;
pub mod quote;
pub mod types;
pub mod value;

pub use column::{AbstractKind, ColumnSpec, RawColumn};
pub use config::{DialectConfig, DialectKind};
pub use ddl::{DdlOperation, IndexTarget};
pub use dialect::{Dialect, DialectFamily, HsqldbDialect, HsqldbVariant, SybaseDialect};
pub use error::{BoxError, DialectError, Result};
pub use identity::{ExecOutcome, StatementExecutor};
pub use introspect::SchemaIntrospector;
pub use pagination::{OffsetStrategy, QuerySpec, RewriteResult, StagedWindow};
pub use types::TypeDeclaration;
pub use value::Value;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::column::{AbstractKind, ColumnSpec, RawColumn};
    pub use crate::config::{DialectConfig, DialectKind};
    pub use crate::ddl::{DdlOperation, IndexTarget};
    pub use crate::dialect::{Dialect, DialectFamily, HsqldbDialect, SybaseDialect};
    pub use crate::error::{BoxError, DialectError, Result};
    pub use crate::identity::{ExecOutcome, StatementExecutor};
    pub use crate::introspect::SchemaIntrospector;
    pub use crate::pagination::{OffsetStrategy, QuerySpec, RewriteResult};
    pub use crate::value::Value;
}
