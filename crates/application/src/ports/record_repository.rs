use addd_domain::{DomainError, Record, RecordType};
use async_trait::async_trait;

#[async_trait]
pub trait RecordRepository: Send + Sync {
    async fn list_records(&self) -> Result<Vec<Record>, DomainError>;

    /// `Ok(None)` when nothing is stored for `(name, record_type)`.
    async fn get_record(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Option<Record>, DomainError>;

    async fn store_record(&self, record: &Record) -> Result<(), DomainError>;

    async fn delete_record(&self, record: &Record) -> Result<(), DomainError>;
}
