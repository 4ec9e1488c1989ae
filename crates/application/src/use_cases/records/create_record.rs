use addd_domain::{DomainError, Record, RecordDraft};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::RecordRepository;

pub struct CreateRecordUseCase {
    repo: Arc<dyn RecordRepository>,
}

impl CreateRecordUseCase {
    pub fn new(repo: Arc<dyn RecordRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, draft: RecordDraft) -> Result<Record, DomainError> {
        let record = draft.validate()?;

        if self
            .repo
            .get_record(record.name(), record.record_type())
            .await?
            .is_some()
        {
            return Err(DomainError::RecordAlreadyExists(format!(
                "{} {}",
                record.name(),
                record.record_type()
            )));
        }

        self.repo.store_record(&record).await?;

        info!(
            name = %record.name(),
            record_type = %record.record_type(),
            address = %record.address(),
            "Record created"
        );

        Ok(record)
    }
}
