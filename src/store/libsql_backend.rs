//! libSQL storage slot — durable key-value persistence.
//!
//! One `slots` table, one row per key. Supports local file and in-memory
//! databases.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use libsql::{Connection, Database, params};
use tracing::info;

use crate::error::StorageError;
use crate::store::traits::StorageSlot;

/// libSQL-backed storage slot.
///
/// Stores a single connection that is reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlSlot {
    #[allow(dead_code)]
    db: Arc<Database>,
    conn: Connection,
}

impl LibSqlSlot {
    /// Open (or create) a local database file and ensure the schema.
    pub async fn new_local(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::Backend(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StorageError::Backend(format!("Failed to open libSQL database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| StorageError::Backend(format!("Failed to create connection: {e}")))?;

        let slot = Self {
            db: Arc::new(db),
            conn,
        };
        slot.init_schema().await?;
        info!(path = %path.display(), "Storage opened");
        Ok(slot)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, StorageError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                StorageError::Backend(format!("Failed to create in-memory database: {e}"))
            })?;

        let conn = db
            .connect()
            .map_err(|e| StorageError::Backend(format!("Failed to create connection: {e}")))?;

        let slot = Self {
            db: Arc::new(db),
            conn,
        };
        slot.init_schema().await?;
        Ok(slot)
    }

    async fn init_schema(&self) -> Result<(), StorageError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS slots (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .await
            .map_err(|e| StorageError::Backend(format!("init_schema: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl StorageSlot for LibSqlSlot {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut rows = self
            .conn
            .query("SELECT value FROM slots WHERE key = ?1", params![key])
            .await
            .map_err(|e| StorageError::Backend(format!("get: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let value: String = row
                    .get(0)
                    .map_err(|e| StorageError::Backend(format!("get: {e}")))?;
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(StorageError::Backend(format!("get: {e}"))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn
            .execute(
                "INSERT INTO slots (key, value) VALUES (?1, ?2)
                 ON CONFLICT (key) DO UPDATE SET value = ?2",
                params![key, value],
            )
            .await
            .map_err(|e| StorageError::Backend(format!("set: {e}")))?;
        Ok(())
    }
}
