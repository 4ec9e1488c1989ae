use addd_application::ports::KeyValueStore;
use addd_domain::DomainError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{error, instrument};

pub struct SqliteKeyValueStore {
    pool: SqlitePool,
}

impl SqliteKeyValueStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let row = sqlx::query_as::<_, (String,)>("SELECT value FROM records WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to read record");
                DomainError::StoreReadFailed(e.to_string())
            })?;

        Ok(row.map(|(value,)| value))
    }

    #[instrument(skip(self, value))]
    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO records (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to write record");
            DomainError::StoreWriteFailed(e.to_string())
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM records WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to delete record");
                DomainError::StoreWriteFailed(e.to_string())
            })?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>, DomainError> {
        let rows = sqlx::query_as::<_, (String,)>("SELECT value FROM records ORDER BY key")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list records");
                DomainError::StoreReadFailed(e.to_string())
            })?;

        Ok(rows.into_iter().map(|(value,)| value).collect())
    }

    async fn close(&self) {
        self.pool.close().await;
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
