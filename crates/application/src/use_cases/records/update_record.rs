use addd_domain::dns_name::names_equal;
use addd_domain::{DomainError, Record, RecordClass, RecordType};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::RecordRepository;

/// Replacement fields for an existing record. Absent fields keep the stored
/// value.
#[derive(Debug, Clone, Default)]
pub struct RecordChanges {
    pub name: Option<String>,
    pub address: Option<String>,
    pub record_type: Option<RecordType>,
    pub class: Option<RecordClass>,
    pub ttl: Option<u32>,
}

pub struct UpdateRecordUseCase {
    repo: Arc<dyn RecordRepository>,
}

impl UpdateRecordUseCase {
    pub fn new(repo: Arc<dyn RecordRepository>) -> Self {
        Self { repo }
    }

    /// Returns the replaced record and its successor.
    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        name: &str,
        record_type: RecordType,
        changes: RecordChanges,
    ) -> Result<(Record, Record), DomainError> {
        let existing = self
            .repo
            .get_record(name, record_type)
            .await?
            .ok_or_else(|| DomainError::RecordNotFound(format!("{} {}", name, record_type)))?;

        let new_name = changes.name.unwrap_or_else(|| existing.name().to_string());
        let new_type = changes.record_type.unwrap_or(existing.record_type());
        if !names_equal(&new_name, existing.name()) || new_type != existing.record_type() {
            return Err(DomainError::RecordMismatch(format!(
                "{} {} cannot replace {} {}",
                new_name,
                new_type,
                existing.name(),
                existing.record_type()
            )));
        }

        let replacement = Record::new(
            &new_name,
            changes.address.as_deref().unwrap_or(existing.address()),
            new_type,
            changes.class.unwrap_or(existing.class()),
            changes.ttl.unwrap_or(existing.ttl()),
        )?;

        self.repo.delete_record(&existing).await?;
        self.repo.store_record(&replacement).await?;

        info!(
            name = %replacement.name(),
            record_type = %replacement.record_type(),
            old_address = %existing.address(),
            new_address = %replacement.address(),
            "Record updated"
        );

        Ok((existing, replacement))
    }
}
