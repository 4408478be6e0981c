//! Fluent column builders.
//!
//! Every engine gets its own builder type ([`MySqlColumn`],
//! [`PostgresColumn`], [`SqliteColumn`]) and they all implement the same
//! [`Column`] trait. The trait carries the whole fluent surface: the
//! engine-specific part is limited to the mapping from a [`LogicalType`]
//! to the engine's type syntax. Constraint bookkeeping is shared through
//! [`ColumnCore`], which only the builders themselves can modify.
//!
//! ```rust
//! use oxide_schema_core::column::{Column, MySqlColumn};
//! use oxide_schema_core::constraints::CA;
//!
//! let column = MySqlColumn::new("user_id")?
//!     .fk()
//!     .references("users", "id")?
//!     .on_delete(CA)?;
//!
//! assert_eq!(column.sql_type(), Some("BIGINT"));
//! assert!(column.constraints().unsigned);
//! # Ok::<(), oxide_schema_core::ColumnError>(())
//! ```

mod mysql;
mod postgres;
mod sqlite;

pub use mysql::MySqlColumn;
pub use postgres::PostgresColumn;
pub use sqlite::SqliteColumn;

use crate::constraints::{
    quote_literal, Constraints, DefaultValue, ForeignKey, ForeignKeyAction, ForeignKeyRef,
};
use crate::engine::Engine;
use crate::error::{ColumnError, Result};
use crate::ident::is_snake_case;

/// Length used by [`Column::varchar`].
pub const DEFAULT_VARCHAR_LENGTH: u32 = 200;
/// Largest accepted `CHAR` length.
pub const MAX_CHAR_LENGTH: u32 = 255;
/// Largest accepted `VARCHAR` length.
pub const MAX_VARCHAR_LENGTH: u32 = 65_535;

/// Length of the text form of an IPv6 address.
const IP_LENGTH: u32 = 39;
/// Length of the hyphenated text form of a UUID.
const UUID_LENGTH: u32 = 36;

/// An engine-independent column type request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicalType {
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
    Char(u32),
    /// Variable-length string.
    VarChar(u32),
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
    DateTime,
    /// Timestamp.
    Timestamp,
    /// Time of day.
    Time,
    /// Year.
    Year,
    /// JSON document.
    Json,
    /// One of a fixed list of strings, in declaration order.
    Enum(Vec<String>),
}

impl LogicalType {
    /// Checks precision, length and enumeration arguments.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Decimal { total, places } if places > total => {
                Err(ColumnError::InvalidDecimal {
                    total: *total,
                    places: *places,
                })
            }
            Self::Char(length) if *length > MAX_CHAR_LENGTH => Err(ColumnError::InvalidLength {
                kind: "CHAR",
                length: *length,
                max: MAX_CHAR_LENGTH,
            }),
            Self::VarChar(length) if *length > MAX_VARCHAR_LENGTH => {
                Err(ColumnError::InvalidLength {
                    kind: "VARCHAR",
                    length: *length,
                    max: MAX_VARCHAR_LENGTH,
                })
            }
            Self::Enum(values) if values.is_empty() => Err(ColumnError::EmptyEnum),
            _ => Ok(()),
        }
    }
}

/// Name, type and constraints shared by every column builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnCore {
    name: String,
    sql_type: Option<String>,
    constraints: Constraints,
}

impl ColumnCore {
    /// Creates an untyped, unconstrained column.
    pub(crate) fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !is_snake_case(&name) {
            return Err(ColumnError::InvalidName(name));
        }
        Ok(Self {
            name,
            sql_type: None,
            constraints: Constraints::default(),
        })
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the engine type, if one was set.
    #[must_use]
    pub fn sql_type(&self) -> Option<&str> {
        self.sql_type.as_deref()
    }

    /// Returns the constraint set.
    #[must_use]
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Copies the current state for resolution.
    #[must_use]
    pub fn snapshot(&self) -> ColumnSnapshot {
        ColumnSnapshot {
            name: self.name.clone(),
            sql_type: self.sql_type.clone(),
            constraints: self.constraints.clone(),
        }
    }

    fn constraints_mut(&mut self) -> &mut Constraints {
        &mut self.constraints
    }

    fn foreign_key_mut(&mut self) -> Result<&mut ForeignKey> {
        self.constraints
            .foreign_key
            .as_mut()
            .ok_or(ColumnError::UndefinedForeignKey)
    }
}

/// A frozen copy of a column, as read by the resolver.
///
/// Changing a snapshot never affects the column it was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSnapshot {
    /// Column name.
    pub name: String,
    /// Engine type, `None` if the column was never typed.
    pub sql_type: Option<String>,
    /// Constraint set.
    pub constraints: Constraints,
}

mod sealed {
    use super::{ColumnCore, LogicalType};

    /// Grants write access to a [`ColumnCore`]. Only `column` can build one.
    #[derive(Debug)]
    pub struct Token(pub(super) ());

    /// Column state behind the fluent surface. Not nameable outside the
    /// crate, so [`super::Column`] cannot be implemented elsewhere.
    pub trait ColumnState {
        fn core(&self) -> &ColumnCore;

        fn core_mut(&mut self, token: Token) -> &mut ColumnCore;

        /// Maps a logical type to this engine's type syntax.
        fn type_name(&self, ty: &LogicalType) -> String;
    }
}

use sealed::{ColumnState, Token};

/// The fluent column surface shared by every engine.
///
/// Builder methods take and return the column by value so calls chain;
/// methods that validate their arguments return a [`Result`].
///
/// The name is fixed at construction. The type and constraints change only
/// through the methods below, so a column's state cannot be swapped for
/// another column's:
///
/// ```compile_fail
/// use oxide_schema_core::column::{Column, MySqlColumn, PostgresColumn};
///
/// let mut column = PostgresColumn::new("user_id").unwrap().int();
/// let other = MySqlColumn::new("renamed").unwrap().enumeration(["a"]).unwrap();
/// *column.core_mut() = other.core().clone();
/// ```
pub trait Column: ColumnState + Sized {
    /// The engine this column renders for.
    fn engine(&self) -> Engine;

    /// Returns the column name.
    fn name(&self) -> &str {
        self.core().name()
    }

    /// Returns the engine type, if one was set.
    fn sql_type(&self) -> Option<&str> {
        self.core().sql_type()
    }

    /// Returns the constraint set.
    fn constraints(&self) -> &Constraints {
        self.core().constraints()
    }

    /// Copies the current state for resolution.
    fn snapshot(&self) -> ColumnSnapshot {
        self.core().snapshot()
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// Sets any logical type, validating its arguments.
    fn logical(self, ty: LogicalType) -> Result<Self> {
        ty.validate()?;
        Ok(assign_type(self, ty))
    }

    /// Very small integer.
    fn tiny_int(self) -> Self {
        assign_type(self, LogicalType::TinyInt)
    }

    /// Small integer.
    fn small_int(self) -> Self {
        assign_type(self, LogicalType::SmallInt)
    }

    /// Medium integer.
    fn medium_int(self) -> Self {
        assign_type(self, LogicalType::MediumInt)
    }

    /// Standard integer.
    fn int(self) -> Self {
        assign_type(self, LogicalType::Int)
    }

    /// 64-bit integer.
    fn big_int(self) -> Self {
        assign_type(self, LogicalType::BigInt)
    }

    /// Single precision float.
    fn float(self) -> Self {
        assign_type(self, LogicalType::Float)
    }

    /// Double precision float.
    fn double(self) -> Self {
        assign_type(self, LogicalType::Double)
    }

    /// Fixed point number with `total` digits, `places` after the point.
    fn decimal(self, total: u32, places: u32) -> Result<Self> {
        self.logical(LogicalType::Decimal { total, places })
    }

    /// Fixed-length string of at most 255 characters.
    fn char(self, length: u32) -> Result<Self> {
        self.logical(LogicalType::Char(length))
    }

    /// Variable-length string of 200 characters.
    fn varchar(self) -> Self {
        assign_type(self, LogicalType::VarChar(DEFAULT_VARCHAR_LENGTH))
    }

    /// Variable-length string of at most 65535 characters.
    fn varchar_with_length(self, length: u32) -> Result<Self> {
        self.logical(LogicalType::VarChar(length))
    }

    /// Text up to 255 bytes.
    fn tiny_text(self) -> Self {
        assign_type(self, LogicalType::TinyText)
    }

    /// Text up to 16 MiB.
    fn medium_text(self) -> Self {
        assign_type(self, LogicalType::MediumText)
    }

    /// Text up to 64 KiB.
    fn text(self) -> Self {
        assign_type(self, LogicalType::Text)
    }

    /// Text up to 4 GiB.
    fn long_text(self) -> Self {
        assign_type(self, LogicalType::LongText)
    }

    /// Boolean.
    fn boolean(self) -> Self {
        assign_type(self, LogicalType::Boolean)
    }

    /// Calendar date.
    fn date(self) -> Self {
        assign_type(self, LogicalType::Date)
    }

    /// Date and time.
    fn datetime(self) -> Self {
        assign_type(self, LogicalType::DateTime)
    }

    /// Timestamp.
    fn timestamp(self) -> Self {
        assign_type(self, LogicalType::Timestamp)
    }

    /// Time of day.
    fn time(self) -> Self {
        assign_type(self, LogicalType::Time)
    }

    /// Year.
    fn year(self) -> Self {
        assign_type(self, LogicalType::Year)
    }

    /// JSON document.
    fn json(self) -> Self {
        assign_type(self, LogicalType::Json)
    }

    /// One of a fixed list of values.
    ///
    /// On engines without a native enumeration type this also adds the
    /// check `<column> IN ('a', 'b', ...)`.
    fn enumeration<I, S>(self, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.logical(LogicalType::Enum(
            values.into_iter().map(Into::into).collect(),
        ))
    }

    // =========================================================================
    // Constraints
    // =========================================================================

    /// Restricts the column to non-negative values.
    ///
    /// Rendered as `UNSIGNED` where the engine supports it, as a check
    /// otherwise.
    fn unsigned(mut self) -> Self {
        state(&mut self).constraints_mut().unsigned = true;
        self
    }

    /// Marks the column as NOT NULL.
    fn not_null(mut self) -> Self {
        state(&mut self).constraints_mut().not_null = true;
        self
    }

    /// Marks the column as auto-incrementing. Requires [`Column::primary_key`].
    fn auto_increment(mut self) -> Self {
        state(&mut self).constraints_mut().auto_increment = true;
        self
    }

    /// Sets the default value.
    ///
    /// Strings are quoted, booleans become `1`/`0`, `None` becomes `NULL`.
    /// Empty strings and non-finite floats are rejected.
    fn default(mut self, value: impl Into<DefaultValue>) -> Result<Self> {
        let literal = value.into().to_sql()?;
        state(&mut self).constraints_mut().default = Some(literal);
        Ok(self)
    }

    /// Adds a UNIQUE constraint.
    fn unique(mut self) -> Self {
        state(&mut self).constraints_mut().unique = true;
        self
    }

    /// Adds a PRIMARY KEY constraint.
    fn primary_key(mut self) -> Self {
        state(&mut self).constraints_mut().primary_key = true;
        self
    }

    /// Starts an empty foreign key, replacing any previous one.
    fn foreign_key(mut self) -> Self {
        state(&mut self).constraints_mut().foreign_key = Some(ForeignKey::default());
        self
    }

    /// Points the foreign key at `table(column)`.
    fn references(mut self, table: &str, column: &str) -> Result<Self> {
        if table.trim().is_empty() {
            return Err(ColumnError::InvalidReferenceTable(table.to_string()));
        }
        if column.trim().is_empty() {
            return Err(ColumnError::InvalidReferenceColumn(column.to_string()));
        }
        state(&mut self).foreign_key_mut()?.references = Some(ForeignKeyRef {
            table: table.to_string(),
            column: column.to_string(),
        });
        Ok(self)
    }

    /// Sets the foreign key ON UPDATE action.
    fn on_update(mut self, action: ForeignKeyAction) -> Result<Self> {
        state(&mut self).foreign_key_mut()?.on_update = Some(action);
        Ok(self)
    }

    /// Sets the foreign key ON DELETE action.
    fn on_delete(mut self, action: ForeignKeyAction) -> Result<Self> {
        state(&mut self).foreign_key_mut()?.on_delete = Some(action);
        Ok(self)
    }

    /// Appends a CHECK condition.
    fn check(mut self, condition: impl Into<String>) -> Result<Self> {
        let condition = condition.into();
        if condition.trim().is_empty() {
            return Err(ColumnError::InvalidCheck(condition));
        }
        state(&mut self).constraints_mut().checks.push(condition);
        Ok(self)
    }

    /// Requests a standalone index on this column.
    fn index(mut self) -> Self {
        state(&mut self).constraints_mut().index = true;
        self
    }

    // =========================================================================
    // Shortcuts
    // =========================================================================

    /// Unsigned auto-incrementing BIGINT primary key.
    fn pk(self) -> Self {
        self.big_int().unsigned().auto_increment().primary_key()
    }

    /// Unsigned BIGINT with an empty foreign key; call
    /// [`Column::references`] next.
    fn fk(self) -> Self {
        self.big_int().unsigned().foreign_key()
    }

    /// VARCHAR wide enough for an IPv6 address.
    fn ip(self) -> Self {
        assign_type(self, LogicalType::VarChar(IP_LENGTH))
    }

    /// VARCHAR wide enough for a hyphenated UUID.
    fn uuid(self) -> Self {
        assign_type(self, LogicalType::VarChar(UUID_LENGTH))
    }
}

fn state<C: Column>(column: &mut C) -> &mut ColumnCore {
    column.core_mut(Token(()))
}

/// Sets an already validated type, emulating enumerations where needed.
fn assign_type<C: Column>(mut column: C, ty: LogicalType) -> C {
    let sql_type = column.type_name(&ty);
    if let LogicalType::Enum(values) = &ty {
        if !column.engine().has_native_enum() {
            let condition = format!("{} IN ({})", column.name(), quoted_list(values));
            state(&mut column).constraints_mut().checks.push(condition);
        }
    }
    state(&mut column).sql_type = Some(sql_type);
    column
}

/// Renders `'a', 'b', 'c'`.
pub(crate) fn quoted_list(values: &[String]) -> String {
    values
        .iter()
        .map(|value| quote_literal(value))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A column of whichever engine is active.
///
/// Returned by factories that pick the builder from a runtime engine
/// identity, so schema code can stay engine-agnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyColumn {
    /// A MySQL column.
    MySql(MySqlColumn),
    /// A PostgreSQL column.
    Postgres(PostgresColumn),
    /// An SQLite column.
    Sqlite(SqliteColumn),
}

impl AnyColumn {
    /// Creates a column for `engine`.
    pub fn new(engine: Engine, name: impl Into<String>) -> Result<Self> {
        Ok(match engine {
            Engine::MySql => Self::MySql(MySqlColumn::new(name)?),
            Engine::Postgres => Self::Postgres(PostgresColumn::new(name)?),
            Engine::Sqlite => Self::Sqlite(SqliteColumn::new(name)?),
        })
    }
}

impl Column for AnyColumn {
    fn engine(&self) -> Engine {
        match self {
            Self::MySql(column) => column.engine(),
            Self::Postgres(column) => column.engine(),
            Self::Sqlite(column) => column.engine(),
        }
    }
}

impl ColumnState for AnyColumn {
    fn core(&self) -> &ColumnCore {
        match self {
            Self::MySql(column) => column.core(),
            Self::Postgres(column) => column.core(),
            Self::Sqlite(column) => column.core(),
        }
    }

    fn core_mut(&mut self, token: Token) -> &mut ColumnCore {
        match self {
            Self::MySql(column) => column.core_mut(token),
            Self::Postgres(column) => column.core_mut(token),
            Self::Sqlite(column) => column.core_mut(token),
        }
    }

    fn type_name(&self, ty: &LogicalType) -> String {
        match self {
            Self::MySql(column) => column.type_name(ty),
            Self::Postgres(column) => column.type_name(ty),
            Self::Sqlite(column) => column.type_name(ty),
        }
    }
}

impl From<MySqlColumn> for AnyColumn {
    fn from(column: MySqlColumn) -> Self {
        Self::MySql(column)
    }
}

impl From<PostgresColumn> for AnyColumn {
    fn from(column: PostgresColumn) -> Self {
        Self::Postgres(column)
    }
}

impl From<SqliteColumn> for AnyColumn {
    fn from(column: SqliteColumn) -> Self {
        Self::Sqlite(column)
    }
}
