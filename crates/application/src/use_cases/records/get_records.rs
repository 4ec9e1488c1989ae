use addd_domain::{DomainError, Record, RecordType};
use std::sync::Arc;
use tracing::instrument;

use crate::ports::RecordRepository;

pub struct GetRecordsUseCase {
    repo: Arc<dyn RecordRepository>,
}

impl GetRecordsUseCase {
    pub fn new(repo: Arc<dyn RecordRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Record>, DomainError> {
        self.repo.list_records().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, name: &str, record_type: RecordType) -> Result<Record, DomainError> {
        self.repo
            .get_record(name, record_type)
            .await?
            .ok_or_else(|| DomainError::RecordNotFound(format!("{} {}", name, record_type)))
    }
}
