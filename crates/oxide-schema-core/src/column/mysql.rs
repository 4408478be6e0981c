//! MySQL column types.

use super::sealed::{ColumnState, Token};
use super::{quoted_list, Column, ColumnCore, LogicalType};
use crate::engine::Engine;
use crate::error::Result;

/// A column rendered with MySQL type names.
///
/// MySQL has native `UNSIGNED`, `AUTO_INCREMENT` and `ENUM`, so nothing
/// here needs emulating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MySqlColumn {
    core: ColumnCore,
}

impl MySqlColumn {
    /// Creates a MySQL column named `name`.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            core: ColumnCore::new(name)?,
        })
    }
}

impl Column for MySqlColumn {
    fn engine(&self) -> Engine {
        Engine::MySql
    }
}

impl ColumnState for MySqlColumn {
    fn core(&self) -> &ColumnCore {
        &self.core
    }

    fn core_mut(&mut self, _: Token) -> &mut ColumnCore {
        &mut self.core
    }

    fn type_name(&self, ty: &LogicalType) -> String {
        match ty {
            LogicalType::TinyInt => "TINYINT".to_string(),
            LogicalType::SmallInt => "SMALLINT".to_string(),
            LogicalType::MediumInt => "MEDIUMINT".to_string(),
            LogicalType::Int => "INT".to_string(),
            LogicalType::BigInt => "BIGINT".to_string(),
            LogicalType::Float => "FLOAT(23)".to_string(),
            LogicalType::Double => "FLOAT(53)".to_string(),
            LogicalType::Decimal { total, places } => format!("DECIMAL({total}, {places})"),
            LogicalType::Char(len) => format!("CHAR({len})"),
            LogicalType::VarChar(len) => format!("VARCHAR({len})"),
            LogicalType::TinyText => "TINYTEXT".to_string(),
            LogicalType::MediumText => "MEDIUMTEXT".to_string(),
            LogicalType::Text => "TEXT".to_string(),
            LogicalType::LongText => "LONGTEXT".to_string(),
            LogicalType::Boolean => "BOOLEAN".to_string(),
            LogicalType::Date => "DATE".to_string(),
            LogicalType::DateTime => "DATETIME".to_string(),
            LogicalType::Timestamp => "TIMESTAMP".to_string(),
            LogicalType::Time => "TIME".to_string(),
            LogicalType::Year => "YEAR".to_string(),
            LogicalType::Json => "JSON".to_string(),
            LogicalType::Enum(values) => format!("ENUM({})", quoted_list(values)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col() -> MySqlColumn {
        MySqlColumn::new("col").unwrap()
    }

    #[test]
    fn test_integer_types() {
        assert_eq!(col().tiny_int().sql_type(), Some("TINYINT"));
        assert_eq!(col().small_int().sql_type(), Some("SMALLINT"));
        assert_eq!(col().medium_int().sql_type(), Some("MEDIUMINT"));
        assert_eq!(col().int().sql_type(), Some("INT"));
        assert_eq!(col().big_int().sql_type(), Some("BIGINT"));
    }

    #[test]
    fn test_numeric_types() {
        assert_eq!(col().float().sql_type(), Some("FLOAT(23)"));
        assert_eq!(col().double().sql_type(), Some("FLOAT(53)"));
        assert_eq!(
            col().decimal(8, 3).unwrap().sql_type(),
            Some("DECIMAL(8, 3)")
        );
    }

    #[test]
    fn test_text_types() {
        assert_eq!(col().char(2).unwrap().sql_type(), Some("CHAR(2)"));
        assert_eq!(
            col().varchar_with_length(50).unwrap().sql_type(),
            Some("VARCHAR(50)")
        );
        assert_eq!(col().tiny_text().sql_type(), Some("TINYTEXT"));
        assert_eq!(col().medium_text().sql_type(), Some("MEDIUMTEXT"));
        assert_eq!(col().text().sql_type(), Some("TEXT"));
        assert_eq!(col().long_text().sql_type(), Some("LONGTEXT"));
    }

    #[test]
    fn test_temporal_and_misc_types() {
        assert_eq!(col().boolean().sql_type(), Some("BOOLEAN"));
        assert_eq!(col().date().sql_type(), Some("DATE"));
        assert_eq!(col().datetime().sql_type(), Some("DATETIME"));
        assert_eq!(col().timestamp().sql_type(), Some("TIMESTAMP"));
        assert_eq!(col().time().sql_type(), Some("TIME"));
        assert_eq!(col().year().sql_type(), Some("YEAR"));
        assert_eq!(col().json().sql_type(), Some("JSON"));
    }

    #[test]
    fn test_native_enum() {
        let status = MySqlColumn::new("status")
            .unwrap()
            .enumeration(["active", "it's"])
            .unwrap();
        assert_eq!(status.sql_type(), Some("ENUM('active', 'it''s')"));
        assert!(status.constraints().checks.is_empty());
    }
}
