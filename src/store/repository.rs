use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::AppError;

pub const TASKS_KEY: &str = "study-tasks";
pub const NOTES_KEY: &str = "study-notes";

/// Durable string-keyed store. Each key holds one JSON-serialized collection;
/// there is no per-record addressing at this layer.
#[derive(Clone)]
pub struct RecordStore {
    db: SqlitePool,
}

impl RecordStore {
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new().max_connections(5);
        if database_url.contains(":memory:") {
            // An in-memory database exists per connection; it must stay on a
            // single long-lived one.
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let db = pool_options.connect_with(options).await?;

        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .map_err(sqlx::Error::from)?;

        Ok(Self { db })
    }

    pub async fn in_memory() -> Result<Self, AppError> {
        Self::connect("sqlite::memory:").await
    }

    /// An absent key reads as an empty collection. A payload that no longer
    /// deserializes is an error, not a silent reset.
    pub async fn load<T>(&self, key: &str) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned,
    {
        let stored: Option<String> = sqlx::query_scalar("SELECT value FROM records WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.db)
            .await?;

        match stored {
            Some(payload) => Ok(serde_json::from_str(&payload)?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn save<T>(&self, key: &str, records: &[T]) -> Result<(), AppError>
    where
        T: Serialize,
    {
        let payload = serde_json::to_string(records)?;

        sqlx::query(
            "INSERT INTO records (key, value) VALUES (?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(payload)
        .execute(&self.db)
        .await?;

        Ok(())
    }
}
