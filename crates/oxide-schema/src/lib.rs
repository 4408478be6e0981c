//! Create and drop tables on MySQL, PostgreSQL and SQLite.
//!
//! `oxide-schema` runs the statements produced by `oxide-schema-core`
//! against a live database:
//!
//! - **Generator** - owns a table name and an executor, hands out columns
//!   for the executor's engine and runs the resulting DDL in order
//! - **Executor** - the database seam; [`SqlxExecutor`] wraps an sqlx
//!   `AnyPool`
//! - **Blueprint** - a table described once in code
//! - **Definition** - tables described in a JSON file
//!
//! # Example
//!
//! ```rust,ignore
//! use oxide_schema::prelude::*;
//!
//! let executor = SqlxExecutor::connect("sqlite::memory:").await?;
//! let generator = Generator::new("example")
//!     .with_table("people")
//!     .with_executor(executor);
//!
//! generator
//!     .schema(&[
//!         generator.primary_key(None)?,
//!         generator.column("age")?.small_int().unsigned().default(18)?,
//!     ])
//!     .await?;
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Print the DDL of a definition file
//! oxide-schema --engine postgres sql schema.json
//!
//! # Create every table of a definition file
//! oxide-schema --database mysql://localhost/app create schema.json
//!
//! # Drop a table
//! oxide-schema drop --table users
//! ```

pub mod blueprint;
pub mod definition;
pub mod error;
pub mod executor;
pub mod generator;

pub use blueprint::Blueprint;
pub use error::{Result, SchemaError};
pub use executor::{Executor, SqlxExecutor};
pub use generator::Generator;

/// Prelude for convenient imports.
pub mod prelude {
    pub use oxide_schema_core::prelude::*;

    pub use crate::blueprint::Blueprint;
    pub use crate::definition::{ColumnDefinition, ColumnKind, SchemaDefinition, TableDefinition};
    pub use crate::error::{Result, SchemaError};
    pub use crate::executor::{Executor, SqlxExecutor};
    pub use crate::generator::Generator;
}
