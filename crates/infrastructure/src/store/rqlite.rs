//! rqlite engine reached through its HTTP data API.
//!
//! Statements are sent parameterized (`[["SQL", arg, ...]]`). Reads use the
//! `strong` consistency level so every node answers with committed data.

use addd_application::ports::KeyValueStore;
use addd_domain::DomainError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{error, info, instrument};

const CREATE_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS records (key TEXT PRIMARY KEY NOT NULL, value TEXT NOT NULL)";

#[derive(Debug, Deserialize)]
struct RqliteResponse {
    #[serde(default)]
    results: Vec<RqliteResult>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RqliteResult {
    #[serde(default)]
    values: Option<Vec<Vec<Value>>>,
    #[serde(default)]
    error: Option<String>,
}

pub struct RqliteKeyValueStore {
    client: reqwest::Client,
    base_url: String,
}

impl RqliteKeyValueStore {
    /// Connects to the cluster and creates the records table if needed.
    pub async fn open(base_url: &str, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::StoreUnavailable(format!("rqlite client: {}", e)))?;

        let store = Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        };

        store
            .execute(json!([[CREATE_TABLE]]))
            .await
            .map_err(|e| DomainError::StoreUnavailable(e.to_string()))?;

        info!(url = %store.base_url, "rqlite store connected");
        Ok(store)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post(&self, path: &str, body: Value) -> Result<RqliteResponse, String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("request to {} failed: {}", url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("{} returned {}", url, status));
        }

        let parsed: RqliteResponse = response
            .json()
            .await
            .map_err(|e| format!("invalid response from {}: {}", url, e))?;

        if let Some(err) = parsed.error.as_deref() {
            return Err(err.to_string());
        }
        if let Some(err) = parsed.results.iter().find_map(|r| r.error.as_deref()) {
            return Err(err.to_string());
        }
        Ok(parsed)
    }

    async fn execute(&self, statements: Value) -> Result<(), String> {
        self.post("/db/execute", statements).await.map(|_| ())
    }

    async fn query_values(&self, statement: Value) -> Result<Vec<String>, String> {
        let response = self.post("/db/query?level=strong", statement).await?;
        let rows = response
            .results
            .into_iter()
            .next()
            .and_then(|result| result.values)
            .unwrap_or_default();

        rows.into_iter()
            .map(|row| match row.into_iter().next() {
                Some(Value::String(value)) => Ok(value),
                other => Err(format!("unexpected column value: {:?}", other)),
            })
            .collect()
    }
}

#[async_trait]
impl KeyValueStore for RqliteKeyValueStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let values = self
            .query_values(json!([["SELECT value FROM records WHERE key = ?", key]]))
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to read record from rqlite");
                DomainError::StoreReadFailed(e)
            })?;

        Ok(values.into_iter().next())
    }

    #[instrument(skip(self, value))]
    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.execute(json!([[
            "INSERT INTO records (key, value) VALUES (?, ?) ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            key,
            value
        ]]))
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to write record to rqlite");
            DomainError::StoreWriteFailed(e)
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.execute(json!([["DELETE FROM records WHERE key = ?", key]]))
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to delete record from rqlite");
                DomainError::StoreWriteFailed(e)
            })
    }

    async fn list(&self) -> Result<Vec<String>, DomainError> {
        self.query_values(json!([["SELECT value FROM records ORDER BY key"]]))
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list records from rqlite");
                DomainError::StoreReadFailed(e)
            })
    }

    async fn close(&self) {}

    fn backend_name(&self) -> &'static str {
        "rqlite"
    }
}
