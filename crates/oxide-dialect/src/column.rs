//! Column descriptions.
//!
//! [`ColumnSpec`] is the dialect-independent description of a column that
//! the caller builds when defining or altering a column, and that
//! [`interpret`](crate::introspect::interpret) produces when reading an
//! existing schema. [`RawColumn`] is what a schema introspector reports.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DialectError;

/// Logical column type family, independent of dialect spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbstractKind {
    /// Auto-generated primary key column.
    PrimaryKey,
    /// Bounded character string.
    String,
    /// Unbounded text.
    Text,
    /// Integer.
    Integer,
    /// Floating point.
    Float,
    /// Fixed-point decimal with precision and scale.
    Decimal,
    /// Date and time.
    Datetime,
    /// Timestamp.
    Timestamp,
    /// Time only.
    Time,
    /// Date only.
    Date,
    /// Binary data.
    Binary,
    /// Boolean.
    Boolean,
}

impl AbstractKind {
    /// All kinds, in table order.
    pub const ALL: [Self; 12] = [
        Self::PrimaryKey,
        Self::String,
        Self::Text,
        Self::Integer,
        Self::Float,
        Self::Decimal,
        Self::Datetime,
        Self::Timestamp,
        Self::Time,
        Self::Date,
        Self::Binary,
        Self::Boolean,
    ];

    /// Returns the snake_case name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PrimaryKey => "primary_key",
            Self::String => "string",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Datetime => "datetime",
            Self::Timestamp => "timestamp",
            Self::Time => "time",
            Self::Date => "date",
            Self::Binary => "binary",
            Self::Boolean => "boolean",
        }
    }

    /// Returns true for kinds whose values are character strings.
    #[must_use]
    pub const fn is_textual(self) -> bool {
        matches!(self, Self::String | Self::Text)
    }
}

impl fmt::Display for AbstractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AbstractKind {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DialectError::Config(format!("unknown column kind '{s}'")))
    }
}

/// Dialect-independent column description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name.
    pub name: String,
    /// Logical type.
    pub kind: AbstractKind,
    /// Length limit, if any.
    pub limit: Option<u32>,
    /// Numeric precision.
    pub precision: Option<u32>,
    /// Numeric scale.
    pub scale: Option<u32>,
    /// Part of the primary key.
    pub primary: bool,
    /// Identity (auto-generated) column.
    pub identity: bool,
    /// Accepts NULL.
    pub nullable: bool,
    /// Default value as unquoted text.
    pub default: Option<String>,
}

impl ColumnSpec {
    /// Creates a nullable column with no limit.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: AbstractKind) -> Self {
        Self {
            name: name.into(),
            kind,
            limit: None,
            precision: None,
            scale: None,
            primary: kind == AbstractKind::PrimaryKey,
            identity: kind == AbstractKind::PrimaryKey,
            nullable: kind != AbstractKind::PrimaryKey,
            default: None,
        }
    }

    /// Sets the length limit.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets precision and scale.
    #[must_use]
    pub const fn precision(mut self, precision: u32, scale: Option<u32>) -> Self {
        self.precision = Some(precision);
        self.scale = scale;
        self
    }

    /// Marks the column as part of the primary key.
    #[must_use]
    pub const fn primary(mut self) -> Self {
        self.primary = true;
        self.nullable = false;
        self
    }

    /// Marks the column as an identity column.
    #[must_use]
    pub const fn identity(mut self) -> Self {
        self.identity = true;
        self
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Returns true if values of this column are character strings.
    #[must_use]
    pub const fn is_textual(&self) -> bool {
        self.kind.is_textual()
    }
}

/// A column as reported by the schema introspector.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawColumn {
    /// Column name.
    pub name: String,
    /// Declared SQL type, e.g. `VARCHAR(255)` or `LONGVARCHAR(0)`.
    pub sql_type: String,
    /// Default as the driver reports it.
    pub default: Option<String>,
    /// Part of the primary key.
    pub primary: bool,
    /// Identity column.
    pub identity: bool,
    /// Accepts NULL.
    pub nullable: bool,
}

impl RawColumn {
    /// Creates a nullable raw column.
    #[must_use]
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            nullable: true,
            ..Self::default()
        }
    }

    /// Marks the column as primary key.
    #[must_use]
    pub const fn primary(mut self) -> Self {
        self.primary = true;
        self.nullable = false;
        self
    }

    /// Marks the column as identity.
    #[must_use]
    pub const fn identity(mut self) -> Self {
        self.identity = true;
        self
    }

    /// Sets the reported default.
    #[must_use]
    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}
