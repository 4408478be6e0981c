//! Dialect-aware column model and `CREATE TABLE` resolver.
//!
//! `oxide-schema-core` turns fluent column definitions into DDL for MySQL,
//! PostgreSQL and SQLite:
//!
//! - **Columns** - one builder per engine behind the shared [`Column`] trait
//! - **Constraints** - the flags, default, foreign key and checks a column
//!   accumulates
//! - **Resolver** - renders column snapshots into `CREATE TABLE` and
//!   `CREATE INDEX` statements, emulating what an engine lacks
//!
//! Nothing here talks to a database; see the `oxide-schema` crate for
//! execution.
//!
//! # Example
//!
//! ```rust
//! use oxide_schema_core::prelude::*;
//!
//! let columns = [
//!     AnyColumn::new(Engine::Postgres, "id")?.pk(),
//!     AnyColumn::new(Engine::Postgres, "age")?.small_int().unsigned(),
//! ];
//! let snapshots: Vec<_> = columns.iter().map(Column::snapshot).collect();
//! let sql = resolve(&snapshots, Engine::Postgres, "people", "example").unwrap();
//!
//! assert_eq!(
//!     sql,
//!     vec![
//!         "CREATE TABLE people (id BIGSERIAL, age SMALLINT, \
//!          CONSTRAINT pk_people_id PRIMARY KEY (id), \
//!          CONSTRAINT check_people_age_0 CHECK (age >= 0));"
//!     ]
//! );
//! # Ok::<(), oxide_schema_core::ColumnError>(())
//! ```

pub mod column;
pub mod constraints;
pub mod engine;
pub mod error;
pub mod ident;
pub mod resolver;

pub use column::{AnyColumn, Column, ColumnSnapshot, LogicalType};
pub use engine::Engine;
pub use error::{ColumnError, ResolveError, UnknownEngine};
pub use resolver::{drop_table, resolve};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::column::{
        AnyColumn, Column, ColumnSnapshot, LogicalType, MySqlColumn, PostgresColumn,
        SqliteColumn,
    };
    pub use crate::constraints::{
        Constraints, DefaultValue, ForeignKeyAction, CA, NA, RE, SD, ST,
    };
    pub use crate::engine::Engine;
    pub use crate::error::{ColumnError, ResolveError};
    pub use crate::resolver::{drop_table, resolve};
}
