use addd_application::ports::KeyValueStore;
use addd_domain::Config;
use std::sync::Arc;
use tracing::{error, info};

pub async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    info!(
        backend = %config.store.backend,
        path = %config.store.path,
        "Initializing record store"
    );

    addd_infrastructure::store::open_store(&config.store)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to open record store");
            anyhow::anyhow!(e)
        })
}
