use anyhow::{Context, Result};
use sqlx::{
    migrate::MigrateDatabase,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Sqlite, SqlitePool,
};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// DbConnection manages the SQLite connection pool
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection with the given pool size
    pub async fn new(url: &str, max_connections: u32) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            info!("Creating database at {}", url);
            Sqlite::create_database(url)
                .await
                .with_context(|| format!("Failed to create database {}", url))?;
        }

        // Foreign keys are on by default in SqliteConnectOptions; the cascades depend on it
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid database url {}", url))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            // An in-memory database disappears with its last connection
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to {}", url))?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize a test database with a unique name
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().simple().to_string();
        let db_url = format!("sqlite:file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url, 1).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS ledgers (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kids (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                ledger_id TEXT NOT NULL,
                name TEXT NOT NULL,
                emoji TEXT NOT NULL,
                sort_order REAL NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY (ledger_id) REFERENCES ledgers (id) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Serves the canonical (sort_order, id) sibling order
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_kids_ledger_order
            ON kids(ledger_id, sort_order, id);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS accounts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                kid_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                balance REAL NOT NULL DEFAULT 0,
                sort_order REAL NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY (kid_id) REFERENCES kids (id) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_accounts_kid_order
            ON accounts(kid_id, sort_order, id);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    #[tokio::test]
    async fn test_schema_is_created() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");

        let rows = sqlx::query("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .fetch_all(db.pool())
            .await
            .expect("Failed to read schema");
        let tables: Vec<String> = rows.iter().map(|r| r.get("name")).collect();

        assert!(tables.contains(&"ledgers".to_string()));
        assert!(tables.contains(&"kids".to_string()));
        assert!(tables.contains(&"accounts".to_string()));
    }

    #[tokio::test]
    async fn test_foreign_keys_are_enforced() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");

        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(db.pool())
            .await
            .expect("Failed to read pragma");
        assert_eq!(enabled, 1);

        // A kid pointing at a missing ledger must be rejected
        let result = sqlx::query(
            "INSERT INTO kids (ledger_id, name, emoji, created_at, updated_at) \
             VALUES ('missing', 'x', 'y', 'now', 'now')",
        )
        .execute(db.pool())
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_test_databases_are_isolated() {
        let first = DbConnection::init_test().await.unwrap();
        let second = DbConnection::init_test().await.unwrap();

        sqlx::query(
            "INSERT INTO ledgers (id, name, created_at, updated_at) \
             VALUES ('a', 'A', 'now', 'now')",
        )
        .execute(first.pool())
        .await
        .unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ledgers")
            .fetch_one(second.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
