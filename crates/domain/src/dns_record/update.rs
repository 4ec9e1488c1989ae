use super::{Record, RecordType};
use crate::dns_message::UpdateRecord;
use crate::dns_name::{normalize_name, validate_domain_name};
use crate::errors::DomainError;

/// What a single update-section RR asks the zone to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOperation {
    Delete { name: String, record_type: RecordType },
    Upsert(Record),
}

impl UpdateOperation {
    pub fn parse(rr: &UpdateRecord) -> Result<Self, DomainError> {
        if !rr.is_delete() {
            return Record::from_update_rr(rr).map(UpdateOperation::Upsert);
        }

        let record_type = RecordType::from_u16(rr.rtype)
            .ok_or_else(|| DomainError::UnsupportedRecordType(format!("TYPE{}", rr.rtype)))?;
        validate_domain_name(&rr.name)?;

        Ok(UpdateOperation::Delete {
            name: normalize_name(&rr.name),
            record_type,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            UpdateOperation::Delete { name, .. } => name,
            UpdateOperation::Upsert(record) => record.name(),
        }
    }

    pub fn record_type(&self) -> RecordType {
        match self {
            UpdateOperation::Delete { record_type, .. } => *record_type,
            UpdateOperation::Upsert(record) => record.record_type(),
        }
    }
}
