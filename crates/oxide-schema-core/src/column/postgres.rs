//! PostgreSQL column types.

use super::sealed::{ColumnState, Token};
use super::{Column, ColumnCore, LogicalType};
use crate::engine::Engine;
use crate::error::Result;

/// A column rendered with PostgreSQL type names.
///
/// Enumerations are stored as `VARCHAR` guarded by an `IN (...)` check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresColumn {
    core: ColumnCore,
}

impl PostgresColumn {
    /// Creates a PostgreSQL column named `name`.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            core: ColumnCore::new(name)?,
        })
    }
}

impl Column for PostgresColumn {
    fn engine(&self) -> Engine {
        Engine::Postgres
    }
}

impl ColumnState for PostgresColumn {
    fn core(&self) -> &ColumnCore {
        &self.core
    }

    fn core_mut(&mut self, _: Token) -> &mut ColumnCore {
        &mut self.core
    }

    fn type_name(&self, ty: &LogicalType) -> String {
        match ty {
            // No single-byte integer in PostgreSQL.
            LogicalType::TinyInt | LogicalType::SmallInt => "SMALLINT".to_string(),
            LogicalType::MediumInt | LogicalType::Int | LogicalType::Year => {
                "INTEGER".to_string()
            }
            LogicalType::BigInt => "BIGINT".to_string(),
            LogicalType::Float => "REAL".to_string(),
            LogicalType::Double => "DOUBLE PRECISION".to_string(),
            LogicalType::Decimal { total, places } => format!("DECIMAL({total}, {places})"),
            LogicalType::Char(len) => format!("CHAR({len})"),
            LogicalType::VarChar(len) => format!("VARCHAR({len})"),
            LogicalType::TinyText => "VARCHAR(255)".to_string(),
            LogicalType::Text => "VARCHAR(65535)".to_string(),
            // VARCHAR is capped at 10485760 characters.
            LogicalType::MediumText | LogicalType::LongText => "TEXT".to_string(),
            LogicalType::Boolean => "BOOLEAN".to_string(),
            LogicalType::Date => "DATE".to_string(),
            LogicalType::DateTime | LogicalType::Timestamp => {
                "TIMESTAMP WITHOUT TIME ZONE".to_string()
            }
            LogicalType::Time => "TIME WITHOUT TIME ZONE".to_string(),
            LogicalType::Json => "JSON".to_string(),
            LogicalType::Enum(_) => "VARCHAR".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col() -> PostgresColumn {
        PostgresColumn::new("col").unwrap()
    }

    #[test]
    fn test_integer_types() {
        assert_eq!(col().tiny_int().sql_type(), Some("SMALLINT"));
        assert_eq!(col().small_int().sql_type(), Some("SMALLINT"));
        assert_eq!(col().medium_int().sql_type(), Some("INTEGER"));
        assert_eq!(col().int().sql_type(), Some("INTEGER"));
        assert_eq!(col().big_int().sql_type(), Some("BIGINT"));
        assert_eq!(col().year().sql_type(), Some("INTEGER"));
    }

    #[test]
    fn test_numeric_types() {
        assert_eq!(col().float().sql_type(), Some("REAL"));
        assert_eq!(col().double().sql_type(), Some("DOUBLE PRECISION"));
        assert_eq!(
            col().decimal(10, 2).unwrap().sql_type(),
            Some("DECIMAL(10, 2)")
        );
    }

    #[test]
    fn test_text_types() {
        assert_eq!(col().char(3).unwrap().sql_type(), Some("CHAR(3)"));
        assert_eq!(col().varchar().sql_type(), Some("VARCHAR(200)"));
        assert_eq!(col().tiny_text().sql_type(), Some("VARCHAR(255)"));
        assert_eq!(col().text().sql_type(), Some("VARCHAR(65535)"));
        assert_eq!(col().medium_text().sql_type(), Some("TEXT"));
        assert_eq!(col().long_text().sql_type(), Some("TEXT"));
    }

    #[test]
    fn test_temporal_types() {
        assert_eq!(col().boolean().sql_type(), Some("BOOLEAN"));
        assert_eq!(col().date().sql_type(), Some("DATE"));
        assert_eq!(col().time().sql_type(), Some("TIME WITHOUT TIME ZONE"));
        assert_eq!(
            col().datetime().sql_type(),
            Some("TIMESTAMP WITHOUT TIME ZONE")
        );
        assert_eq!(
            col().timestamp().sql_type(),
            Some("TIMESTAMP WITHOUT TIME ZONE")
        );
        assert_eq!(col().json().sql_type(), Some("JSON"));
    }

    #[test]
    fn test_enum_becomes_check() {
        let role = PostgresColumn::new("role")
            .unwrap()
            .check("role <> ''")
            .unwrap()
            .enumeration(["admin", "user"])
            .unwrap();
        assert_eq!(role.sql_type(), Some("VARCHAR"));
        assert_eq!(
            role.constraints().checks,
            vec!["role <> ''", "role IN ('admin', 'user')"]
        );
    }
}
