//! The constraint set a column accumulates while it is being built.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColumnError;

/// Foreign key referential action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ForeignKeyAction {
    /// Propagate the change to dependent rows.
    Cascade,
    /// Set the referencing column to NULL.
    SetNull,
    /// Set the referencing column to its default value.
    SetDefault,
    /// Reject the change immediately.
    Restrict,
    /// Reject the change at the end of the statement.
    NoAction,
}

/// Shorthand for [`ForeignKeyAction::Cascade`].
pub const CA: ForeignKeyAction = ForeignKeyAction::Cascade;
/// Shorthand for [`ForeignKeyAction::SetNull`].
pub const ST: ForeignKeyAction = ForeignKeyAction::SetNull;
/// Shorthand for [`ForeignKeyAction::SetDefault`].
pub const SD: ForeignKeyAction = ForeignKeyAction::SetDefault;
/// Shorthand for [`ForeignKeyAction::Restrict`].
pub const RE: ForeignKeyAction = ForeignKeyAction::Restrict;
/// Shorthand for [`ForeignKeyAction::NoAction`].
pub const NA: ForeignKeyAction = ForeignKeyAction::NoAction;

impl ForeignKeyAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
            Self::Restrict => "RESTRICT",
            Self::NoAction => "NO ACTION",
        }
    }
}

impl fmt::Display for ForeignKeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for ForeignKeyAction {
    type Err = ColumnError;

    /// Parses `CASCADE`, `SET NULL`, `set_null`, `no-action` and the like.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .to_ascii_uppercase()
            .replace(['_', '-'], " ");
        match normalized.as_str() {
            "CASCADE" => Ok(Self::Cascade),
            "SET NULL" => Ok(Self::SetNull),
            "SET DEFAULT" => Ok(Self::SetDefault),
            "RESTRICT" => Ok(Self::Restrict),
            "NO ACTION" => Ok(Self::NoAction),
            _ => Err(ColumnError::InvalidAction(s.to_string())),
        }
    }
}

impl TryFrom<String> for ForeignKeyAction {
    type Error = ColumnError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ForeignKeyAction> for String {
    fn from(action: ForeignKeyAction) -> Self {
        action.as_sql().to_string()
    }
}

/// The `table(column)` a foreign key points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyRef {
    /// The referenced table name.
    pub table: String,
    /// The referenced column name.
    pub column: String,
}

/// A foreign key descriptor, filled in one call at a time.
///
/// `foreign_key()` creates it empty; `references`, `on_delete` and
/// `on_update` complete it. Resolving requires `references`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForeignKey {
    /// Referenced table and column.
    pub references: Option<ForeignKeyRef>,
    /// Action on delete.
    pub on_delete: Option<ForeignKeyAction>,
    /// Action on update.
    pub on_update: Option<ForeignKeyAction>,
}

/// A column default before rendering.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    /// NULL default.
    Null,
    /// Boolean default, stored as `1`/`0`.
    Bool(bool),
    /// Integer default.
    Int(i64),
    /// Float default.
    Float(f64),
    /// String default.
    Str(String),
}

impl DefaultValue {
    /// Renders the value as a SQL literal.
    ///
    /// Fails for empty strings and non-finite floats.
    pub fn to_sql(&self) -> Result<String, ColumnError> {
        match self {
            Self::Null => Ok(String::from("NULL")),
            Self::Bool(b) => Ok(String::from(if *b { "1" } else { "0" })),
            Self::Int(i) => Ok(i.to_string()),
            Self::Float(f) if f.is_finite() => Ok(f.to_string()),
            Self::Float(f) => Err(ColumnError::InvalidDefault(f.to_string())),
            Self::Str(s) if s.is_empty() => {
                Err(ColumnError::InvalidDefault(String::from("empty string")))
            }
            Self::Str(s) => Ok(quote_literal(s)),
        }
    }
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for DefaultValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for DefaultValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for DefaultValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl<T: Into<DefaultValue>> From<Option<T>> for DefaultValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// The sparse constraint set of one column.
///
/// Every flag starts unset. The set is only mutated through the column
/// builder; the resolver works on a cloned snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    /// Restrict to non-negative values.
    pub unsigned: bool,
    /// NOT NULL.
    pub not_null: bool,
    /// Auto-increment; requires `primary_key` at resolve time.
    pub auto_increment: bool,
    /// Default value, already rendered as a SQL literal.
    pub default: Option<String>,
    /// UNIQUE constraint.
    pub unique: bool,
    /// PRIMARY KEY constraint.
    pub primary_key: bool,
    /// Foreign key descriptor.
    pub foreign_key: Option<ForeignKey>,
    /// CHECK conditions in the order they were added.
    pub checks: Vec<String>,
    /// Create a standalone index after the table.
    pub index: bool,
}

/// Quotes a string as a SQL literal, doubling embedded single quotes.
pub(crate) fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
