use addd_domain::{DomainError, Record, RecordType};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::RecordRepository;

pub struct DeleteRecordUseCase {
    repo: Arc<dyn RecordRepository>,
}

impl DeleteRecordUseCase {
    pub fn new(repo: Arc<dyn RecordRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, name: &str, record_type: RecordType) -> Result<Record, DomainError> {
        let record = self
            .repo
            .get_record(name, record_type)
            .await?
            .ok_or_else(|| DomainError::RecordNotFound(format!("{} {}", name, record_type)))?;

        self.repo.delete_record(&record).await?;

        info!(name = %record.name(), record_type = %record_type, "Record deleted");
        Ok(record)
    }
}
