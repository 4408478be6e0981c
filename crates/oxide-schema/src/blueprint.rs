//! Reusable table definitions.

use std::future::Future;

use oxide_schema_core::AnyColumn;

use crate::error::Result;
use crate::executor::Executor;
use crate::generator::Generator;

/// A table described once and created on any engine.
///
/// ```rust,ignore
/// use oxide_schema::prelude::*;
///
/// struct UsersTable;
///
/// impl Blueprint for UsersTable {
///     const NAME: &'static str = "UsersTable";
///     const TABLE: &'static str = "users";
///
///     fn columns<E: Executor>(&self, g: &Generator<E>) -> Result<Vec<AnyColumn>> {
///         Ok(vec![
///             g.primary_key(None)?,
///             g.column("email")?.varchar().not_null().unique(),
///         ])
///     }
/// }
///
/// UsersTable.create(executor).await?;
/// ```
pub trait Blueprint {
    /// Name reported in errors.
    const NAME: &'static str;

    /// Table name.
    const TABLE: &'static str;

    /// Builds the table's columns with `generator`.
    fn columns<E: Executor>(&self, generator: &Generator<E>) -> Result<Vec<AnyColumn>>;

    /// Returns a generator for this table on `executor`.
    fn generator<E: Executor>(executor: E) -> Generator<E> {
        Generator::new(Self::NAME)
            .with_table(Self::TABLE)
            .with_executor(executor)
    }

    /// Creates the table.
    fn create<E: Executor>(&self, executor: E) -> impl Future<Output = Result<()>> + Send
    where
        Self: Sync,
    {
        async move {
            let generator = Self::generator(executor);
            let columns = self.columns(&generator)?;
            generator.schema(&columns).await
        }
    }

    /// Drops the table.
    fn drop<E: Executor>(executor: E) -> impl Future<Output = Result<()>> + Send {
        async move { Self::generator(executor).drop().await }
    }
}

#[cfg(test)]
mod tests {
    use oxide_schema_core::constraints::CA;
    use oxide_schema_core::Column;

    use super::*;
    use crate::error::SchemaError;
    use crate::generator::tests::RecordingExecutor;

    struct UsersTable;

    impl Blueprint for UsersTable {
        const NAME: &'static str = "UsersTable";
        const TABLE: &'static str = "users";

        fn columns<E: Executor>(&self, g: &Generator<E>) -> Result<Vec<AnyColumn>> {
            let mut columns = vec![
                g.primary_key(None)?,
                g.column("email")?.varchar().not_null().unique(),
                g.column("team_id")?.fk().references("teams", "id")?.on_delete(CA)?,
            ];
            columns.extend(g.timestamps()?);
            Ok(columns)
        }
    }

    struct BadTable;

    impl Blueprint for BadTable {
        const NAME: &'static str = "BadTable";
        const TABLE: &'static str = "Bad Table";

        fn columns<E: Executor>(&self, g: &Generator<E>) -> Result<Vec<AnyColumn>> {
            Ok(vec![g.primary_key(None)?])
        }
    }

    #[tokio::test]
    async fn test_create() {
        let executor = RecordingExecutor::new("SQLite");
        UsersTable.create(&executor).await.unwrap();
        assert_eq!(
            executor.calls(),
            vec![
                "CREATE TABLE users (id INTEGER, email TEXT NOT NULL, team_id INTEGER, \
                 created_at TEXT, updated_at TEXT, \
                 CONSTRAINT pk_users_id PRIMARY KEY (id), \
                 CONSTRAINT unique_users_email UNIQUE (email), \
                 CONSTRAINT fk_users_team_id FOREIGN KEY (team_id) REFERENCES teams(id) ON DELETE CASCADE, \
                 CONSTRAINT check_users_team_id_0 CHECK (team_id >= 0));"
            ]
        );
    }

    #[tokio::test]
    async fn test_drop() {
        let executor = RecordingExecutor::new("MySQL");
        UsersTable::drop(&executor).await.unwrap();
        assert_eq!(executor.calls(), vec!["DROP TABLE users;"]);
    }

    #[tokio::test]
    async fn test_errors_name_the_blueprint() {
        let executor = RecordingExecutor::new("MySQL");
        let err = BadTable.create(&executor).await.unwrap_err();
        assert!(matches!(err, SchemaError::InvalidTable { .. }));
        assert_eq!(err.to_string(), "Invalid table name 'Bad Table' in: BadTable");
        assert!(executor.calls().is_empty());
    }

    #[test]
    fn test_generator_carries_names() {
        let generator = UsersTable::generator(RecordingExecutor::new("MySQL"));
        assert_eq!(generator.origin(), "UsersTable");
        assert_eq!(generator.table().unwrap(), "users");
        assert!(generator.column("id").unwrap().name() == "id");
    }
}
