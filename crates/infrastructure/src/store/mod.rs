pub mod memory;
pub mod rqlite;
pub mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use rqlite::RqliteKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

use crate::database::create_pool;
use addd_application::ports::KeyValueStore;
use addd_domain::config::{StoreBackend, StoreConfig};
use addd_domain::DomainError;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Opens the engine selected by `config`. Failure here is fatal at startup.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>, DomainError> {
    let store: Arc<dyn KeyValueStore> = match config.backend {
        StoreBackend::Sqlite => {
            let pool = create_pool(&config.path, Duration::from_secs(config.busy_timeout_secs))
                .await
                .map_err(|e| {
                    DomainError::StoreUnavailable(format!(
                        "cannot open database {}: {}",
                        config.path, e
                    ))
                })?;
            Arc::new(SqliteKeyValueStore::new(pool))
        }
        StoreBackend::Rqlite => {
            let url = config.rqlite_url.as_deref().ok_or_else(|| {
                DomainError::StoreUnavailable("rqlite backend requires rqlite_url".to_string())
            })?;
            Arc::new(
                RqliteKeyValueStore::open(url, Duration::from_millis(config.rqlite_timeout_ms))
                    .await?,
            )
        }
        StoreBackend::Memory => Arc::new(MemoryKeyValueStore::new()),
    };

    info!(backend = store.backend_name(), "Record store opened");
    Ok(store)
}
