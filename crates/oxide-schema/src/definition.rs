//! Declarative schema files.
//!
//! A definition is a JSON document listing tables and their columns:
//!
//! ```json
//! {
//!   "tables": [
//!     {
//!       "name": "users",
//!       "columns": [
//!         { "name": "id", "type": "pk" },
//!         { "name": "email", "type": "varchar", "length": 255, "not_null": true, "unique": true },
//!         { "name": "role", "type": "enum", "values": ["admin", "member"] },
//!         { "name": "team_id", "type": "fk", "references": { "table": "teams", "column": "id" },
//!           "on_delete": "CASCADE" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Every column is applied through the regular builder, so a definition is
//! held to the same validation as code.

#![deny(missing_docs)]

use std::path::Path;

use oxide_schema_core::constraints::{DefaultValue, ForeignKeyAction, ForeignKeyRef};
use oxide_schema_core::{AnyColumn, Column, ColumnError, Engine};
use serde::{Deserialize, Deserializer};
use tracing::info;

use crate::error::{Result, SchemaError};
use crate::executor::Executor;
use crate::generator::{render_table, validate_table, Generator};

/// Origin reported for errors raised while applying a definition.
const DEFINITION_ORIGIN: &str = "SchemaDefinition";

/// A set of tables, created in file order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SchemaDefinition {
    /// Tables to create.
    pub tables: Vec<TableDefinition>,
}

/// One table of a [`SchemaDefinition`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TableDefinition {
    /// Table name.
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<ColumnDefinition>,
}

/// One column of a [`TableDefinition`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColumnDefinition {
    /// Column name.
    pub name: String,
    /// Column type, from the `type` field.
    #[serde(flatten)]
    pub kind: ColumnKind,
    /// Rendered as `UNSIGNED`, or as a `>= 0` check.
    #[serde(default)]
    pub unsigned: bool,
    /// Adds `NOT NULL`.
    #[serde(default)]
    pub not_null: bool,
    /// Auto-increments; needs `primary_key`.
    #[serde(default)]
    pub auto_increment: bool,
    /// Part of the table's primary key.
    #[serde(default)]
    pub primary_key: bool,
    /// Adds a named UNIQUE constraint.
    #[serde(default)]
    pub unique: bool,
    /// Creates a standalone index after the table.
    #[serde(default)]
    pub index: bool,
    /// Starts an empty foreign key.
    #[serde(default)]
    pub foreign_key: bool,
    /// Default value; an explicit `null` means `DEFAULT NULL`.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub default: Option<DefaultValue>,
    /// CHECK conditions, in order.
    #[serde(default)]
    pub checks: Vec<String>,
    /// Referenced table and column; implies `foreign_key`.
    #[serde(default)]
    pub references: Option<ForeignKeyRef>,
    /// ON DELETE action, e.g. `"CASCADE"`.
    #[serde(default)]
    pub on_delete: Option<ForeignKeyAction>,
    /// ON UPDATE action.
    #[serde(default)]
    pub on_update: Option<ForeignKeyAction>,
}

/// The `type` of a column definition and its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnKind {
    /// Very small integer.
    TinyInt,
    /// Small integer.
    SmallInt,
    /// Medium integer.
    MediumInt,
    /// Standard integer.
    Int,
    /// 64-bit integer.
    BigInt,
    /// Single precision float.
    Float,
    /// Double precision float.
    Double,
    /// Fixed point number.
    Decimal {
        /// Total number of digits.
        total: u32,
        /// Digits after the decimal point.
        places: u32,
    },
    /// Fixed-length string.
    Char {
        /// At most 255.
        length: u32,
    },
    /// Variable-length string.
    Varchar {
        /// At most 65535; 200 when omitted.
        #[serde(default)]
        length: Option<u32>,
    },
    /// Text up to 255 bytes.
    TinyText,
    /// Text up to 16 MiB.
    MediumText,
    /// Text up to 64 KiB.
    Text,
    /// Text up to 4 GiB.
    LongText,
    /// Boolean.
    Boolean,
    /// Calendar date.
    Date,
    /// Date and time.
    Datetime,
    /// Timestamp.
    Timestamp,
    /// Time of day.
    Time,
    /// Year.
    Year,
    /// JSON document.
    Json,
    /// One of a fixed list of values.
    Enum {
        /// Allowed values, in order.
        values: Vec<String>,
    },
    /// See [`Column::pk`].
    Pk,
    /// See [`Column::fk`].
    Fk,
    /// See [`Column::ip`].
    Ip,
    /// See [`Column::uuid`].
    Uuid,
}

// `Option<T>` would read `null` as "absent".
fn deserialize_some<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl ColumnDefinition {
    /// Builds the column for `engine`.
    pub fn build(&self, engine: Engine) -> std::result::Result<AnyColumn, ColumnError> {
        let column = AnyColumn::new(engine, self.name.as_str())?;
        let mut column = match &self.kind {
            ColumnKind::TinyInt => column.tiny_int(),
            ColumnKind::SmallInt => column.small_int(),
            ColumnKind::MediumInt => column.medium_int(),
            ColumnKind::Int => column.int(),
            ColumnKind::BigInt => column.big_int(),
            ColumnKind::Float => column.float(),
            ColumnKind::Double => column.double(),
            ColumnKind::Decimal { total, places } => column.decimal(*total, *places)?,
            ColumnKind::Char { length } => column.char(*length)?,
            ColumnKind::Varchar { length: Some(length) } => column.varchar_with_length(*length)?,
            ColumnKind::Varchar { length: None } => column.varchar(),
            ColumnKind::TinyText => column.tiny_text(),
            ColumnKind::MediumText => column.medium_text(),
            ColumnKind::Text => column.text(),
            ColumnKind::LongText => column.long_text(),
            ColumnKind::Boolean => column.boolean(),
            ColumnKind::Date => column.date(),
            ColumnKind::Datetime => column.datetime(),
            ColumnKind::Timestamp => column.timestamp(),
            ColumnKind::Time => column.time(),
            ColumnKind::Year => column.year(),
            ColumnKind::Json => column.json(),
            ColumnKind::Enum { values } => column.enumeration(values.iter().cloned())?,
            ColumnKind::Pk => column.pk(),
            ColumnKind::Fk => column.fk(),
            ColumnKind::Ip => column.ip(),
            ColumnKind::Uuid => column.uuid(),
        };

        if self.unsigned {
            column = column.unsigned();
        }
        if self.not_null {
            column = column.not_null();
        }
        if self.auto_increment {
            column = column.auto_increment();
        }
        if self.primary_key {
            column = column.primary_key();
        }
        if self.unique {
            column = column.unique();
        }
        if self.index {
            column = column.index();
        }
        if let Some(default) = &self.default {
            column = column.default(default.clone())?;
        }
        for check in &self.checks {
            column = column.check(check.as_str())?;
        }

        let wants_foreign_key = self.foreign_key || self.references.is_some();
        if wants_foreign_key && column.constraints().foreign_key.is_none() {
            column = column.foreign_key();
        }
        if let Some(target) = &self.references {
            column = column.references(&target.table, &target.column)?;
        }
        if let Some(action) = self.on_delete {
            column = column.on_delete(action)?;
        }
        if let Some(action) = self.on_update {
            column = column.on_update(action)?;
        }
        Ok(column)
    }
}

impl TableDefinition {
    /// Builds every column for `engine`.
    pub fn columns(&self, engine: Engine) -> Result<Vec<AnyColumn>> {
        self.columns
            .iter()
            .map(|column| column.build(engine).map_err(SchemaError::from))
            .collect()
    }

    /// Resolves the table's statements for `engine`.
    pub fn render(&self, engine: Engine) -> Result<Vec<String>> {
        validate_table(&self.name, DEFINITION_ORIGIN)?;
        render_table(DEFINITION_ORIGIN, &self.name, engine, &self.columns(engine)?)
    }
}

impl SchemaDefinition {
    /// Parses a definition from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a definition file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Resolves every table for `engine`, in file order.
    pub fn render(&self, engine: Engine) -> Result<Vec<String>> {
        let mut statements = Vec::new();
        for table in &self.tables {
            statements.extend(table.render(engine)?);
        }
        Ok(statements)
    }

    /// Creates every table on `executor`, in file order.
    ///
    /// Stops at the first table that fails; earlier tables stay created.
    pub async fn create_all<E: Executor>(&self, executor: &E) -> Result<()> {
        for table in &self.tables {
            let generator = Generator::new(DEFINITION_ORIGIN)
                .with_table(&table.name)
                .with_executor(executor);
            let columns = table.columns(generator.engine()?)?;
            generator.schema(&columns).await?;
        }
        info!(tables = self.tables.len(), "Schema definition applied");
        Ok(())
    }
}
