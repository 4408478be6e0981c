//! Table generator.
//!
//! A [`Generator`] owns a table name and an [`Executor`]. It hands out
//! column builders for the executor's engine, resolves them into
//! statements and runs those statements one at a time.

use oxide_schema_core::ident::is_snake_case;
use oxide_schema_core::{drop_table, resolve, AnyColumn, Column, Engine};
use tracing::{debug, info, warn};

use crate::error::{Result, SchemaError};
use crate::executor::Executor;

/// Creates and drops one table.
#[derive(Debug, Clone)]
pub struct Generator<E> {
    origin: String,
    table: Option<String>,
    executor: Option<E>,
}

impl<E: Executor> Generator<E> {
    /// Creates a generator without table or executor.
    ///
    /// `origin` names the caller in every error the generator reports.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            table: None,
            executor: None,
        }
    }

    /// Sets the table name.
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Sets the executor.
    #[must_use]
    pub fn with_executor(mut self, executor: E) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Replaces the table name. It is validated by [`Generator::table`].
    pub fn set_table(&mut self, table: impl Into<String>) {
        self.table = Some(table.into());
    }

    /// Replaces the executor.
    pub fn set_executor(&mut self, executor: E) {
        self.executor = Some(executor);
    }

    /// Returns the origin name used in errors.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns the table name, rejecting anything that is not snake_case.
    pub fn table(&self) -> Result<&str> {
        let table = self
            .table
            .as_deref()
            .ok_or_else(|| SchemaError::UndefinedTable {
                origin: self.origin.clone(),
            })?;
        validate_table(table, &self.origin)?;
        Ok(table)
    }

    /// Returns the executor.
    pub fn executor(&self) -> Result<&E> {
        self.executor
            .as_ref()
            .ok_or_else(|| SchemaError::InvalidExecutor {
                origin: self.origin.clone(),
            })
    }

    /// Returns the engine the executor talks to.
    pub fn engine(&self) -> Result<Engine> {
        let backend = self.executor()?.backend_name();
        Engine::from_backend_name(backend).map_err(|_| SchemaError::InvalidEngine {
            backend: backend.to_string(),
            origin: self.origin.clone(),
        })
    }

    /// Returns an untyped column of the executor's engine.
    pub fn column(&self, name: impl Into<String>) -> Result<AnyColumn> {
        Ok(AnyColumn::new(self.engine()?, name)?)
    }

    /// A `created_at` datetime column.
    pub fn created_at(&self) -> Result<AnyColumn> {
        Ok(self.column("created_at")?.datetime())
    }

    /// An `updated_at` datetime column.
    pub fn updated_at(&self) -> Result<AnyColumn> {
        Ok(self.column("updated_at")?.datetime())
    }

    /// Both `created_at` and `updated_at`.
    pub fn timestamps(&self) -> Result<Vec<AnyColumn>> {
        Ok(vec![self.created_at()?, self.updated_at()?])
    }

    /// An auto-incrementing primary key column, named `id` by default.
    pub fn primary_key(&self, name: Option<&str>) -> Result<AnyColumn> {
        Ok(self.column(name.unwrap_or("id"))?.pk())
    }

    /// Resolves `columns` without executing anything.
    pub fn statements(&self, columns: &[AnyColumn]) -> Result<Vec<String>> {
        if columns.is_empty() {
            return Err(SchemaError::EmptySchema {
                origin: self.origin.clone(),
            });
        }
        render_table(&self.origin, self.table()?, self.engine()?, columns)
    }

    /// Creates the table.
    ///
    /// Statements run in order, each awaited before the next. The first
    /// failing statement stops the run and its error is returned.
    pub async fn schema(&self, columns: &[AnyColumn]) -> Result<()> {
        let statements = self.statements(columns)?;
        let table = self.table()?;
        let executor = self.executor()?;

        for sql in &statements {
            self.run(executor, sql).await?;
        }

        info!(table, statements = statements.len(), "Created table");
        Ok(())
    }

    /// Drops the table.
    pub async fn drop(&self) -> Result<()> {
        let table = self.table()?;
        let executor = self.executor()?;
        self.run(executor, &drop_table(table)).await?;
        info!(table, "Dropped table");
        Ok(())
    }

    async fn run(&self, executor: &E, sql: &str) -> Result<()> {
        debug!(origin = %self.origin, sql = %sql, "Executing statement");
        executor.execute(sql).await.map_err(|e| {
            warn!(origin = %self.origin, sql = %sql, error = %e, "Statement failed");
            SchemaError::execution(e)
        })
    }
}

pub(crate) fn validate_table(table: &str, origin: &str) -> Result<()> {
    if is_snake_case(table) {
        Ok(())
    } else {
        Err(SchemaError::InvalidTable {
            table: table.to_string(),
            origin: origin.to_string(),
        })
    }
}

/// Checks that every column belongs to `engine` and resolves them.
pub(crate) fn render_table(
    origin: &str,
    table: &str,
    engine: Engine,
    columns: &[AnyColumn],
) -> Result<Vec<String>> {
    if columns.is_empty() {
        return Err(SchemaError::EmptySchema {
            origin: origin.to_string(),
        });
    }

    let mismatched = columns.iter().filter(|c| c.engine() != engine).count();
    if mismatched > 0 {
        return Err(SchemaError::InvalidColumns {
            origin: origin.to_string(),
            expected: engine,
            mismatched,
        });
    }

    let snapshots: Vec<_> = columns.iter().map(Column::snapshot).collect();
    Ok(resolve(&snapshots, engine, table, origin)?)
}
