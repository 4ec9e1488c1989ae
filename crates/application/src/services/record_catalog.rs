use addd_domain::{DomainError, Record, RecordType, StorageKey};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::ports::{KeyValueStore, RecordRepository};

/// Record-level view over any [`KeyValueStore`].
pub struct RecordCatalog {
    store: Arc<dyn KeyValueStore>,
}

impl RecordCatalog {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RecordRepository for RecordCatalog {
    async fn list_records(&self) -> Result<Vec<Record>, DomainError> {
        let values = self.store.list().await?;
        let records = values
            .iter()
            .filter_map(|value| match Record::from_store_value(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(error = %e, "Skipping undecodable stored record");
                    None
                }
            })
            .collect::<Vec<_>>();

        debug!(count = records.len(), "Records listed");
        Ok(records)
    }

    async fn get_record(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Option<Record>, DomainError> {
        let key = StorageKey::new(name, record_type)?;
        match self.store.get(key.as_str()).await? {
            Some(value) => Record::from_store_value(&value).map(Some),
            None => Ok(None),
        }
    }

    async fn store_record(&self, record: &Record) -> Result<(), DomainError> {
        let value = record.to_store_value()?;
        self.store
            .set(record.storage_key().as_str(), &value)
            .await
    }

    async fn delete_record(&self, record: &Record) -> Result<(), DomainError> {
        self.store.delete(record.storage_key().as_str()).await
    }
}
