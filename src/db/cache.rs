use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::StoreError;

/// Durable byte-string store keyed by string.
///
/// No deletion, enumeration or expiry: entries live until overwritten.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}

/// SQLite-backed cache of raw remote payloads
pub struct SqliteCache {
    pool: Pool<Sqlite>,
}

impl SqliteCache {
    /// Open (or create) the cache database
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        use anyhow::Context;

        // Create data directory if needed
        if let Some(path) = database_url.strip_prefix("sqlite:") {
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .context("Failed to create database directory")?;
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)
            .context("Invalid database URL")?
            .create_if_missing(true);

        // Single writer for the whole run
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .context("Failed to connect to cache database")?;

        let store = Self { pool };
        store.init_schema().await?;

        info!("Cache store initialized");
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cache_entries (
                key TEXT PRIMARY KEY NOT NULL,
                value BLOB NOT NULL,
                written_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Number of cached entries
    pub async fn count(&self) -> Result<i64, StoreError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cache_entries")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.0)
    }
}

#[async_trait]
impl KvStore for SqliteCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let row: Option<(Vec<u8>,)> =
            sqlx::query_as("SELECT value FROM cache_entries WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        debug!("Cache {} for {}", if row.is_some() { "hit" } else { "miss" }, key);
        Ok(row.map(|r| r.0))
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO cache_entries (key, value, written_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                written_at = excluded.written_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Process-local store, for tests and runs that should not touch disk
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Vec<u8>>>,
    writes: RwLock<usize>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of `set` calls so far
    pub async fn write_count(&self) -> usize {
        *self.writes.read().await
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_vec());
        *self.writes.write().await += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_cache_round_trip() {
        let cache = MemoryCache::new();
        assert!(cache.get("Opt").await.unwrap().is_none());

        cache.set("Opt", b"{}").await.unwrap();
        cache.set("Opt", b"{\"name\":\"Opt\"}").await.unwrap();

        assert_eq!(
            cache.get("Opt").await.unwrap().as_deref(),
            Some(&b"{\"name\":\"Opt\"}"[..])
        );
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.write_count().await, 2);
    }

    #[tokio::test]
    async fn test_sqlite_cache_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}", dir.path().join("cache.db").display());

        {
            let cache = SqliteCache::new(&url).await.unwrap();
            cache.set("perf_HBG_WR", b"[]").await.unwrap();
            cache.set("perf_HBG_WR", b"[{}]").await.unwrap();
            assert_eq!(cache.count().await.unwrap(), 1);
        }

        let cache = SqliteCache::new(&url).await.unwrap();
        assert_eq!(
            cache.get("perf_HBG_WR").await.unwrap().as_deref(),
            Some(&b"[{}]"[..])
        );
        assert!(cache.get("perf_HBG_WU").await.unwrap().is_none());
    }
}
