use addd_domain::DomainError;
use async_trait::async_trait;

/// Capability every storage engine provides. Keys are the encoded
/// [`addd_domain::StorageKey`] strings, values are serialized records.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// `None` when the key has never been set or was deleted.
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), DomainError>;

    /// All stored values. Engines return them in ascending key order.
    async fn list(&self) -> Result<Vec<String>, DomainError>;

    async fn close(&self);

    fn backend_name(&self) -> &'static str;
}
