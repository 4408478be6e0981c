//! Generator and blueprints against an in-memory SQLite database.

use std::io::Write;

use oxide_schema::prelude::*;
use sqlx::any::AnyPoolOptions;

async fn create_test_executor() -> SqlxExecutor {
    SqlxExecutor::connect_with(AnyPoolOptions::new().max_connections(1), "sqlite::memory:")
        .await
        .unwrap()
}

async fn object_exists(executor: &SqlxExecutor, kind: &str, name: &str) -> bool {
    let row: Option<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type = ? AND name = ?")
            .bind(kind)
            .bind(name)
            .fetch_optional(executor.pool())
            .await
            .unwrap();
    row.is_some()
}

struct TeamsTable;

impl Blueprint for TeamsTable {
    const NAME: &'static str = "TeamsTable";
    const TABLE: &'static str = "teams";

    fn columns<E: Executor>(&self, g: &Generator<E>) -> Result<Vec<AnyColumn>> {
        Ok(vec![
            g.primary_key(None)?,
            g.column("name")?.varchar().not_null().unique(),
        ])
    }
}

struct UsersTable;

impl Blueprint for UsersTable {
    const NAME: &'static str = "UsersTable";
    const TABLE: &'static str = "users";

    fn columns<E: Executor>(&self, g: &Generator<E>) -> Result<Vec<AnyColumn>> {
        let mut columns = vec![
            g.primary_key(None)?,
            g.column("email")?.varchar().not_null().unique(),
            g.column("age")?.small_int().unsigned().default(18)?,
            g.column("role")?.enumeration(["admin", "member"])?.default("member")?,
            g.column("team_id")?
                .fk()
                .references("teams", "id")?
                .on_delete(CA)?
                .index(),
        ];
        columns.extend(g.timestamps()?);
        Ok(columns)
    }
}

#[tokio::test]
async fn test_create_tables_and_index() {
    let executor = create_test_executor().await;
    TeamsTable.create(&executor).await.unwrap();
    UsersTable.create(&executor).await.unwrap();

    assert!(object_exists(&executor, "table", "teams").await);
    assert!(object_exists(&executor, "table", "users").await);
    assert!(object_exists(&executor, "index", "index_users_team_id").await);
}

#[tokio::test]
async fn test_emulated_checks_are_enforced() {
    let executor = create_test_executor().await;
    TeamsTable.create(&executor).await.unwrap();
    UsersTable.create(&executor).await.unwrap();

    sqlx::query("INSERT INTO users (email) VALUES ('ok@example.com')")
        .execute(executor.pool())
        .await
        .unwrap();

    let negative_age = sqlx::query("INSERT INTO users (email, age) VALUES ('neg@example.com', -1)")
        .execute(executor.pool())
        .await;
    assert!(negative_age.is_err());

    let bad_role = sqlx::query("INSERT INTO users (email, role) VALUES ('role@example.com', 'owner')")
        .execute(executor.pool())
        .await;
    assert!(bad_role.is_err());

    let row: (i64, String) = sqlx::query_as("SELECT age, role FROM users WHERE email = 'ok@example.com'")
        .fetch_one(executor.pool())
        .await
        .unwrap();
    assert_eq!(row, (18, "member".to_string()));
}

#[tokio::test]
async fn test_drop() {
    let executor = create_test_executor().await;
    TeamsTable.create(&executor).await.unwrap();
    TeamsTable::drop(&executor).await.unwrap();
    assert!(!object_exists(&executor, "table", "teams").await);
}

#[tokio::test]
async fn test_database_error_is_passed_through() {
    let executor = create_test_executor().await;
    TeamsTable.create(&executor).await.unwrap();

    let err = TeamsTable.create(&executor).await.unwrap_err();
    let source = err
        .as_execution()
        .and_then(|e| e.downcast_ref::<sqlx::Error>());
    assert!(matches!(source, Some(sqlx::Error::Database(_))));
}

#[tokio::test]
async fn test_definition_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "tables": [
                {{ "name": "teams", "columns": [{{ "name": "id", "type": "pk" }}] }},
                {{
                    "name": "members",
                    "columns": [
                        {{ "name": "id", "type": "pk" }},
                        {{ "name": "team_id", "type": "fk",
                           "references": {{ "table": "teams", "column": "id" }},
                           "on_delete": "cascade" }},
                        {{ "name": "ip", "type": "ip", "index": true }}
                    ]
                }}
            ]
        }}"#
    )
    .unwrap();

    let schema = SchemaDefinition::from_path(file.path()).unwrap();
    let executor = create_test_executor().await;
    schema.create_all(&executor).await.unwrap();

    assert!(object_exists(&executor, "table", "teams").await);
    assert!(object_exists(&executor, "table", "members").await);
    assert!(object_exists(&executor, "index", "index_members_ip").await);
}

#[tokio::test]
async fn test_missing_definition_file() {
    let err = SchemaDefinition::from_path("does/not/exist.json").unwrap_err();
    assert!(matches!(err, SchemaError::Io(_)));
}
