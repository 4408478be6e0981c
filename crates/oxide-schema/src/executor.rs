//! Statement execution.
//!
//! The generator only needs two things from a database: the name of the
//! backend it talks to, and a way to run one raw statement.

use std::future::Future;

use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;

/// Runs raw SQL statements against one database.
pub trait Executor: Send + Sync {
    /// The error returned by a failed statement.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Backend name, e.g. `MySQL`, `PostgreSQL` or `SQLite`.
    fn backend_name(&self) -> &str;

    /// Executes one statement.
    fn execute(&self, sql: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

impl<E: Executor> Executor for &E {
    type Error = E::Error;

    fn backend_name(&self) -> &str {
        (**self).backend_name()
    }

    fn execute(&self, sql: &str) -> impl Future<Output = Result<(), Self::Error>> + Send {
        (**self).execute(sql)
    }
}

/// An [`Executor`] backed by an sqlx `AnyPool`.
///
/// The backend name is read from a pooled connection once, when the
/// executor is built.
#[derive(Debug, Clone)]
pub struct SqlxExecutor {
    pool: AnyPool,
    backend: String,
}

impl SqlxExecutor {
    /// Connects to `url` with default pool options.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        Self::connect_with(AnyPoolOptions::new().max_connections(5), url).await
    }

    /// Connects to `url` with the given pool options.
    pub async fn connect_with(options: AnyPoolOptions, url: &str) -> Result<Self, sqlx::Error> {
        sqlx::any::install_default_drivers();
        let pool = options.connect(url).await?;
        Self::from_pool(pool).await
    }

    /// Wraps an existing pool.
    pub async fn from_pool(pool: AnyPool) -> Result<Self, sqlx::Error> {
        let backend = pool.acquire().await?.backend_name().to_string();
        Ok(Self { pool, backend })
    }

    /// Returns the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }
}

impl Executor for SqlxExecutor {
    type Error = sqlx::Error;

    fn backend_name(&self) -> &str {
        &self.backend
    }

    async fn execute(&self, sql: &str) -> Result<(), sqlx::Error> {
        sqlx::query(sql).execute(&self.pool).await?;
        Ok(())
    }
}
