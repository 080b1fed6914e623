//! Mapping of abstract column kinds to dialect type declarations.
//!
//! Each dialect owns a [`TypeTable`] built once per process and shared
//! read-only afterwards. [`type_to_sql`] renders a [`TypeDeclaration`] from
//! that table, applying the caller's limit, precision and scale.

use std::collections::HashMap;
use std::fmt;

use crate::column::AbstractKind;
use crate::dialect::Dialect;

/// How a dialect spells one abstract kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRule {
    /// Native type name.
    pub name: &'static str,
    /// Limit used when the caller supplies none.
    pub limit: Option<u32>,
}

impl TypeRule {
    /// A type without a default limit.
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self { name, limit: None }
    }

    /// A type with a default limit.
    #[must_use]
    pub const fn limited(name: &'static str, limit: u32) -> Self {
        Self {
            name,
            limit: Some(limit),
        }
    }
}

/// Per-dialect mapping from abstract kind to native type.
#[derive(Debug, Clone)]
pub struct TypeTable {
    primary_key: &'static str,
    rules: HashMap<AbstractKind, TypeRule>,
}

impl TypeTable {
    /// Creates a table from the primary key fragment and a rule for every
    /// other kind.
    #[must_use]
    pub fn new(primary_key: &'static str, rule: impl Fn(AbstractKind) -> TypeRule) -> Self {
        let rules = AbstractKind::ALL
            .into_iter()
            .filter(|kind| *kind != AbstractKind::PrimaryKey)
            .map(|kind| (kind, rule(kind)))
            .collect();
        Self { primary_key, rules }
    }

    /// Returns the full primary key column fragment.
    #[must_use]
    pub const fn primary_key(&self) -> &'static str {
        self.primary_key
    }

    /// Returns the rule for a kind.
    #[must_use]
    pub fn rule(&self, kind: AbstractKind) -> Option<&TypeRule> {
        self.rules.get(&kind)
    }
}

/// A rendered type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDeclaration {
    /// A plain column type.
    Column {
        /// Native type name.
        name: String,
        /// Length limit.
        limit: Option<u32>,
        /// Numeric precision.
        precision: Option<u32>,
        /// Numeric scale.
        scale: Option<u32>,
    },
    /// A complete primary key fragment (type, identity and constraint).
    PrimaryKey(String),
}

impl fmt::Display for TypeDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrimaryKey(fragment) => f.write_str(fragment),
            Self::Column {
                name,
                limit,
                precision,
                scale,
            } => {
                f.write_str(name)?;
                match (precision, scale, limit) {
                    (Some(p), Some(s), _) => write!(f, "({p},{s})"),
                    (Some(p), None, _) => write!(f, "({p})"),
                    (None, _, Some(l)) => write!(f, "({l})"),
                    (None, _, None) => Ok(()),
                }
            }
        }
    }
}

/// Renders the declaration of `kind` for `dialect`.
///
/// Primary keys ignore every argument. Integer and boolean columns never
/// carry a limit. Precision and scale only apply to decimals.
#[must_use]
pub fn type_to_sql<D: Dialect + ?Sized>(
    dialect: &D,
    kind: AbstractKind,
    limit: Option<u32>,
    precision: Option<u32>,
    scale: Option<u32>,
) -> TypeDeclaration {
    let table = dialect.type_table();
    if kind == AbstractKind::PrimaryKey {
        return TypeDeclaration::PrimaryKey(table.primary_key().to_string());
    }

    let (name, default_limit) = table
        .rule(kind)
        .map_or((kind.as_str(), None), |rule| (rule.name, rule.limit));

    let limit = match kind {
        AbstractKind::Integer | AbstractKind::Boolean => None,
        AbstractKind::Decimal if precision.is_some() => None,
        _ => limit.or(default_limit),
    };
    let (precision, scale) = if kind == AbstractKind::Decimal {
        (precision, precision.and(scale))
    } else {
        (None, None)
    };

    TypeDeclaration::Column {
        name: name.to_string(),
        limit,
        precision,
        scale,
    }
}
