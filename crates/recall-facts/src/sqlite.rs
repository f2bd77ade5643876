//! SQLite-backed fact store

use std::str::FromStr;

use async_trait::async_trait;

use recall_core::{FactStore, MemoryError, Result};

/// Durable fact store on a single SQLite table.
pub struct SqliteFactStore {
    pool: sqlx::SqlitePool,
}

impl SqliteFactStore {
    /// Opens (or creates) the database at `path`.
    pub async fn new(path: &str) -> Result<Self> {
        let options = sqlx::sqlite::SqliteConnectOptions::from_str(path)
            .map_err(|e| MemoryError::Storage(e.to_string()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = sqlx::SqlitePool::connect_with(options)
            .await
            .map_err(|e| MemoryError::Storage(e.to_string()))?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Private in-memory database, useful for tests.
    ///
    /// The pool is pinned to one persistent connection: every pooled SQLite
    /// connection to `:memory:` would otherwise open its own empty database.
    pub async fn in_memory() -> Result<Self> {
        let options = sqlx::sqlite::SqliteConnectOptions::from_str(":memory:")
            .map_err(|e| MemoryError::Storage(e.to_string()))?;

        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| MemoryError::Storage(e.to_string()))?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS facts (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| MemoryError::Storage(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl FactStore for SqliteFactStore {
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query("REPLACE INTO facts (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await
            .map_err(|e| MemoryError::Storage(e.to_string()))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT value FROM facts WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| MemoryError::Storage(e.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM facts WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| MemoryError::Storage(e.to_string()))?;
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT key FROM facts ORDER BY key")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| MemoryError::Storage(e.to_string()))
    }
}
