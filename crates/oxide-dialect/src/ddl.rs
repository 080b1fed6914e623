//! Schema change statements.
//!
//! A [`DdlOperation`] describes one change; [`generate_sql`] renders it for a
//! dialect. Statements that differ between dialects come from the
//! [`Dialect`] trait, column types come from [`type_to_sql`] and default
//! values go through [`quote`].

use crate::column::ColumnSpec;
use crate::dialect::Dialect;
use crate::error::Result;
use crate::quote::quote;
use crate::types::{TypeDeclaration, type_to_sql};
use crate::value::Value;

/// Which index a `RemoveIndex` operation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexTarget {
    /// An index with an explicit name.
    Name(String),
    /// The conventionally named index over these columns.
    Columns(Vec<String>),
}

impl IndexTarget {
    /// Returns the index name, composing `index_<table>_on_<a>_and_<b>` for
    /// column targets.
    #[must_use]
    pub fn index_name(&self, table: &str) -> String {
        match self {
            Self::Name(name) => name.clone(),
            Self::Columns(columns) => format!("index_{table}_on_{}", columns.join("_and_")),
        }
    }
}

/// A schema change.
#[derive(Debug, Clone, PartialEq)]
pub enum DdlOperation {
    /// Create a table.
    CreateTable {
        /// Table name.
        name: String,
        /// Column definitions.
        columns: Vec<ColumnSpec>,
    },
    /// Drop a table.
    DropTable {
        /// Table name.
        name: String,
    },
    /// Add a column.
    AddColumn {
        /// Table name.
        table: String,
        /// Column definition.
        column: ColumnSpec,
    },
    /// Change a column's type.
    ChangeColumn {
        /// Table name.
        table: String,
        /// New column definition.
        column: ColumnSpec,
    },
    /// Change a column's default.
    ChangeColumnDefault {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
        /// New default.
        default: Value,
    },
    /// Rename a column.
    RenameColumn {
        /// Table name.
        table: String,
        /// Current column name.
        old_name: String,
        /// New column name.
        new_name: String,
    },
    /// Rename a table.
    RenameTable {
        /// Current table name.
        old_name: String,
        /// New table name.
        new_name: String,
    },
    /// Drop an index.
    RemoveIndex {
        /// Table the index belongs to.
        table: String,
        /// The index.
        index: IndexTarget,
    },
    /// Create a database.
    CreateDatabase {
        /// Database name.
        name: String,
    },
    /// Drop a database.
    DropDatabase {
        /// Database name.
        name: String,
    },
    /// Drop and recreate a database.
    RecreateDatabase {
        /// Database name.
        name: String,
    },
}

/// Renders `operation` as the statements to run, in order.
///
/// Some operations render no statement for some dialects (e.g. creating a
/// database that comes into existence on first connection).
///
/// # Errors
///
/// Returns [`DialectError::ValueCoercion`](crate::DialectError::ValueCoercion)
/// when a default value does not fit its column.
pub fn generate_sql<D: Dialect + ?Sized>(dialect: &D, operation: &DdlOperation) -> Result<Vec<String>> {
    let statements = match operation {
        DdlOperation::CreateTable { name, columns } => {
            let defs = columns
                .iter()
                .map(|c| column_definition(dialect, c))
                .collect::<Result<Vec<_>>>()?;
            vec![format!(
                "CREATE TABLE {} ({})",
                dialect.quote_table_name(name),
                defs.join(", ")
            )]
        }
        DdlOperation::DropTable { name } => {
            vec![format!("DROP TABLE {}", dialect.quote_table_name(name))]
        }
        DdlOperation::AddColumn { table, column } => vec![format!(
            "ALTER TABLE {} ADD {}",
            dialect.quote_table_name(table),
            column_definition(dialect, column)?
        )],
        DdlOperation::ChangeColumn { table, column } => {
            vec![dialect.change_column_sql(table, &column.name, &column_type(dialect, column))]
        }
        DdlOperation::ChangeColumnDefault {
            table,
            column,
            default,
        } => vec![dialect.change_column_default_sql(table, column, &quote(dialect, default, None)?)],
        DdlOperation::RenameColumn {
            table,
            old_name,
            new_name,
        } => vec![dialect.rename_column_sql(table, old_name, new_name)],
        DdlOperation::RenameTable { old_name, new_name } => {
            vec![dialect.rename_table_sql(old_name, new_name)]
        }
        DdlOperation::RemoveIndex { table, index } => {
            vec![dialect.remove_index_sql(table, &index.index_name(table))]
        }
        DdlOperation::CreateDatabase { name } => dialect.create_database_sql(name),
        DdlOperation::DropDatabase { name } => dialect.drop_database_sql(name),
        DdlOperation::RecreateDatabase { name } => dialect.recreate_database_sql(name),
    };
    Ok(statements)
}

fn column_type<D: Dialect + ?Sized>(dialect: &D, column: &ColumnSpec) -> TypeDeclaration {
    type_to_sql(
        dialect,
        column.kind,
        column.limit,
        column.precision,
        column.scale,
    )
}

/// Renders `<name> <type> [DEFAULT <value>] [NOT NULL]`.
///
/// Primary key fragments already carry their constraints and get nothing
/// appended.
///
/// # Errors
///
/// Returns a coercion error when the default does not fit the column.
pub fn column_definition<D: Dialect + ?Sized>(dialect: &D, column: &ColumnSpec) -> Result<String> {
    let decl = column_type(dialect, column);
    let mut sql = format!("{} {decl}", dialect.quote_column_name(&column.name));
    if matches!(decl, TypeDeclaration::PrimaryKey(_)) {
        return Ok(sql);
    }

    if let Some(ref default) = column.default {
        sql.push_str(" DEFAULT ");
        sql.push_str(&quote(dialect, &Value::Text(default.clone()), Some(column))?);
    }
    if !column.nullable {
        sql.push_str(" NOT NULL");
    }
    Ok(sql)
}
