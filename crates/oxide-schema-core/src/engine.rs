//! Supported database engines and the ways their DDL differs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownEngine;

/// One of the three engines the resolver can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// MySQL (and MariaDB).
    MySql,
    /// PostgreSQL.
    Postgres,
    /// SQLite.
    Sqlite,
}

/// How an engine expresses an auto-incrementing primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoIncrement {
    /// A keyword appended to the column declaration.
    Keyword(&'static str),
    /// A sequence-backed type that replaces the declared type.
    Serial(&'static str),
    /// Integer primary keys auto-increment without any extra syntax.
    Implicit,
}

/// How an engine restricts a numeric column to non-negative values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unsigned {
    /// A keyword appended to the column type.
    Keyword(&'static str),
    /// A `CHECK (<column> >= 0)` constraint.
    Check,
}

impl Engine {
    /// All supported engines.
    pub const ALL: [Self; 3] = [Self::MySql, Self::Postgres, Self::Sqlite];

    /// Returns the engine for a driver backend name.
    ///
    /// Accepts the names reported by `sqlx::AnyConnection::backend_name()`
    /// (`MySQL`, `PostgreSQL`, `SQLite`) as well as the short forms used in
    /// connection URLs, case-insensitively.
    pub fn from_backend_name(name: &str) -> Result<Self, UnknownEngine> {
        match name.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Self::MySql),
            "postgresql" | "postgres" | "pg" => Ok(Self::Postgres),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            _ => Err(UnknownEngine(name.to_string())),
        }
    }

    /// Returns the display name of the engine.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MySql => "MySQL",
            Self::Postgres => "PostgreSQL",
            Self::Sqlite => "SQLite",
        }
    }

    /// Returns how this engine declares auto-increment columns.
    #[must_use]
    pub const fn auto_increment(self) -> AutoIncrement {
        match self {
            Self::MySql => AutoIncrement::Keyword("AUTO_INCREMENT"),
            Self::Postgres => AutoIncrement::Serial("BIGSERIAL"),
            Self::Sqlite => AutoIncrement::Implicit,
        }
    }

    /// Returns how this engine declares unsigned columns.
    #[must_use]
    pub const fn unsigned(self) -> Unsigned {
        match self {
            Self::MySql => Unsigned::Keyword("UNSIGNED"),
            Self::Postgres | Self::Sqlite => Unsigned::Check,
        }
    }

    /// Returns whether the engine has a native `ENUM` type.
    ///
    /// Engines without one store enumerations as text guarded by an
    /// `IN (...)` check.
    #[must_use]
    pub const fn has_native_enum(self) -> bool {
        match self {
            Self::MySql => true,
            Self::Postgres | Self::Sqlite => false,
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Engine {
    type Err = UnknownEngine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_backend_name(s)
    }
}
