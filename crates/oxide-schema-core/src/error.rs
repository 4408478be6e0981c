//! Error types for column building and statement resolution.

/// Errors raised while building a column.
///
/// These are reported at the call that introduced the problem, so a
/// misconfigured column never reaches the resolver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColumnError {
    /// The column name is not a snake_case identifier.
    #[error("Invalid column name: {0}")]
    InvalidName(String),

    /// `DECIMAL(total, places)` arguments out of range.
    #[error(
        "Invalid arguments: total must be >= 0, places must be >= 0 and <= total \
         (total: {total}, places: {places})"
    )]
    InvalidDecimal {
        /// Total number of digits.
        total: u32,
        /// Digits after the decimal point.
        places: u32,
    },

    /// A `CHAR`/`VARCHAR` length outside the engine bound.
    #[error("Invalid {kind} length {length}: must be between 0 and {max}")]
    InvalidLength {
        /// The type being declared.
        kind: &'static str,
        /// The requested length.
        length: u32,
        /// Largest accepted length.
        max: u32,
    },

    /// An enumeration without any values.
    #[error("Invalid enum values: at least one value is required")]
    EmptyEnum,

    /// A default value that cannot be rendered as a SQL literal.
    #[error("Invalid default value: {0}")]
    InvalidDefault(String),

    /// A blank check condition.
    #[error("Invalid check condition: {0:?}")]
    InvalidCheck(String),

    /// A blank referenced table name.
    #[error("Invalid table name: {0:?}")]
    InvalidReferenceTable(String),

    /// A blank referenced column name.
    #[error("Invalid column name: {0:?}")]
    InvalidReferenceColumn(String),

    /// A reference or referential action set before `foreign_key()`.
    #[error("Undefined foreign key")]
    UndefinedForeignKey,

    /// A referential action name that is not one of the five known actions.
    #[error("Invalid operation: {0}")]
    InvalidAction(String),
}

/// Errors raised while turning columns into statements.
///
/// Every variant names the table, the column where one is known, and the
/// origin (the generator or blueprint that asked for the statements).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// A column without a name.
    #[error("Undefined column name for table '{table}' in: {origin}")]
    UndefinedName {
        /// Table being resolved.
        table: String,
        /// Caller name used for diagnostics.
        origin: String,
    },

    /// A column that was never given a type.
    #[error("Undefined column type for '{table}.{column}' in: {origin}")]
    UndefinedType {
        /// Table being resolved.
        table: String,
        /// Offending column.
        column: String,
        /// Caller name used for diagnostics.
        origin: String,
    },

    /// Auto-increment set on a column that is not a primary key.
    #[error("Your auto-increment column '{table}.{column}' must be a primary key in: {origin}")]
    AutoIncrementWithoutPrimaryKey {
        /// Table being resolved.
        table: String,
        /// Offending column.
        column: String,
        /// Caller name used for diagnostics.
        origin: String,
    },

    /// A foreign key that never received `references(table, column)`.
    #[error("Undefined foreign key reference for '{table}.{column}' in: {origin}")]
    UndefinedReference {
        /// Table being resolved.
        table: String,
        /// Offending column.
        column: String,
        /// Caller name used for diagnostics.
        origin: String,
    },
}

/// A backend name that does not belong to any supported engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown database engine: {0}")]
pub struct UnknownEngine(pub String);

/// Result type for column building.
pub type Result<T> = std::result::Result<T, ColumnError>;
