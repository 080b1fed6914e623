//! Dialect selection.
//!
//! The dialect is chosen once, when the connection is configured, and
//! never by inspecting statements at runtime.
//!
//! ```rust
//! use oxide_dialect::Dialect;
//! use oxide_dialect::config::DialectConfig;
//!
//! let config = DialectConfig::from_json(
//!     r##"{"dialect": "sybase", "offset_strategy": {"kind": "temp_table", "table": "#artemp"}}"##,
//! )
//! .unwrap();
//! let dialect = config.build().unwrap();
//! assert_eq!(dialect.name(), "sybase");
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dialect::{Dialect, HsqldbDialect, SybaseDialect};
use crate::error::{DialectError, Result};
use crate::pagination::OffsetStrategy;

/// Supported databases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialectKind {
    /// HyperSQL.
    Hsqldb,
    /// H2.
    H2,
    /// Sybase.
    Sybase,
}

impl DialectKind {
    /// Guesses the dialect from a JDBC-style URL or driver name.
    #[must_use]
    pub fn detect(url_or_driver: &str) -> Option<Self> {
        let s = url_or_driver.to_lowercase();
        if s.contains("hsqldb") {
            Some(Self::Hsqldb)
        } else if s.contains(".h2.") || s.contains(":h2:") {
            Some(Self::H2)
        } else if s.contains("sybase") {
            Some(Self::Sybase)
        } else {
            None
        }
    }
}

/// Dialect configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectConfig {
    /// Target database.
    pub dialect: DialectKind,
    /// How TOP-only dialects skip rows. Ignored by the others.
    #[serde(default)]
    pub offset_strategy: OffsetStrategy,
}

impl DialectConfig {
    /// Creates a configuration with the default offset strategy.
    #[must_use]
    pub fn new(dialect: DialectKind) -> Self {
        Self {
            dialect,
            offset_strategy: OffsetStrategy::default(),
        }
    }

    /// Sets the offset strategy.
    #[must_use]
    pub fn offset_strategy(mut self, strategy: OffsetStrategy) -> Self {
        self.offset_strategy = strategy;
        self
    }

    /// Creates a configuration for the database a URL points at.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::Config`] if no dialect matches.
    pub fn for_url(url: &str) -> Result<Self> {
        DialectKind::detect(url)
            .map(Self::new)
            .ok_or_else(|| DialectError::Config(format!("no dialect for '{url}'")))
    }

    /// Parses a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::Serialization`] for malformed JSON and
    /// [`DialectError::Config`] for invalid settings.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the settings.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::Config`] for an empty staging table name.
    pub fn validate(&self) -> Result<()> {
        if let OffsetStrategy::TempTable { table } = &self.offset_strategy {
            if table.trim().is_empty() {
                return Err(DialectError::Config(
                    "temp_table strategy needs a table name".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Builds the configured dialect.
    ///
    /// # Errors
    ///
    /// See [`DialectConfig::validate`].
    pub fn build(&self) -> Result<Box<dyn Dialect>> {
        self.validate()?;
        let dialect: Box<dyn Dialect> = match self.dialect {
            DialectKind::Hsqldb => Box::new(HsqldbDialect::hsqldb()),
            DialectKind::H2 => Box::new(HsqldbDialect::h2()),
            DialectKind::Sybase => Box::new(
                SybaseDialect::new().with_offset_strategy(self.offset_strategy.clone()),
            ),
        };
        debug!(dialect = dialect.name(), "Configured dialect");
        Ok(dialect)
    }
}
