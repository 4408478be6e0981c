//! SQLite column types.
//!
//! SQLite only knows storage classes, so most logical types collapse to
//! `INTEGER`, `REAL`, `NUMERIC` or `TEXT`.

use super::sealed::{ColumnState, Token};
use super::{Column, ColumnCore, LogicalType};
use crate::engine::Engine;
use crate::error::Result;

/// A column rendered with SQLite storage classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteColumn {
    core: ColumnCore,
}

impl SqliteColumn {
    /// Creates an SQLite column named `name`.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            core: ColumnCore::new(name)?,
        })
    }
}

impl Column for SqliteColumn {
    fn engine(&self) -> Engine {
        Engine::Sqlite
    }
}

impl ColumnState for SqliteColumn {
    fn core(&self) -> &ColumnCore {
        &self.core
    }

    fn core_mut(&mut self, _: Token) -> &mut ColumnCore {
        &mut self.core
    }

    fn type_name(&self, ty: &LogicalType) -> String {
        let class = match ty {
            LogicalType::TinyInt
            | LogicalType::SmallInt
            | LogicalType::MediumInt
            | LogicalType::Int
            | LogicalType::BigInt
            | LogicalType::Boolean
            | LogicalType::Year => "INTEGER",
            LogicalType::Float | LogicalType::Double => "REAL",
            LogicalType::Decimal { .. } => "NUMERIC",
            LogicalType::Char(_)
            | LogicalType::VarChar(_)
            | LogicalType::TinyText
            | LogicalType::MediumText
            | LogicalType::Text
            | LogicalType::LongText
            | LogicalType::Date
            | LogicalType::DateTime
            | LogicalType::Timestamp
            | LogicalType::Time
            | LogicalType::Json
            | LogicalType::Enum(_) => "TEXT",
        };
        class.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col() -> SqliteColumn {
        SqliteColumn::new("col").unwrap()
    }

    #[test]
    fn test_integer_class() {
        for column in [
            col().tiny_int(),
            col().small_int(),
            col().medium_int(),
            col().int(),
            col().big_int(),
            col().boolean(),
            col().year(),
        ] {
            assert_eq!(column.sql_type(), Some("INTEGER"));
        }
    }

    #[test]
    fn test_real_and_numeric_class() {
        assert_eq!(col().float().sql_type(), Some("REAL"));
        assert_eq!(col().double().sql_type(), Some("REAL"));
        assert_eq!(col().decimal(10, 2).unwrap().sql_type(), Some("NUMERIC"));
    }

    #[test]
    fn test_text_class() {
        for column in [
            col().char(4).unwrap(),
            col().varchar(),
            col().tiny_text(),
            col().medium_text(),
            col().text(),
            col().long_text(),
            col().date(),
            col().datetime(),
            col().timestamp(),
            col().time(),
            col().json(),
            col().uuid(),
        ] {
            assert_eq!(column.sql_type(), Some("TEXT"));
        }
    }

    #[test]
    fn test_enum_becomes_check() {
        let size = SqliteColumn::new("size")
            .unwrap()
            .enumeration(["s", "m", "l"])
            .unwrap();
        assert_eq!(size.sql_type(), Some("TEXT"));
        assert_eq!(size.constraints().checks, vec!["size IN ('s', 'm', 'l')"]);
    }
}
