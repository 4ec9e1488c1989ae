use super::{RecordClass, RecordType, StorageKey};
use crate::dns_message::{UpdateData, UpdateRecord};
use crate::dns_name::{normalize_name, validate_domain_name};
use crate::errors::DomainError;
use crate::resource_record::ResourceRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

pub const DEFAULT_RECORD_TTL: u32 = 86_400;

/// A stored address binding.
///
/// Fields are only reachable through accessors so every instance has passed
/// validation: the name is a valid, lower-cased domain without a trailing dot
/// and the address family agrees with the record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordDraft")]
pub struct Record {
    #[serde(rename = "fqdn")]
    name: String,
    address: String,
    #[serde(rename = "type")]
    record_type: RecordType,
    class: RecordClass,
    ttl: u32,
}

/// Unvalidated field set, used to pre-fill create forms and to decode stored
/// values. Missing fields fall back to [`RecordDraft::default`], unknown fields
/// are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordDraft {
    pub fqdn: String,
    pub address: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub class: RecordClass,
    pub ttl: u32,
}

impl Default for RecordDraft {
    fn default() -> Self {
        Self {
            fqdn: String::new(),
            address: String::new(),
            record_type: RecordType::A,
            class: RecordClass::IN,
            ttl: DEFAULT_RECORD_TTL,
        }
    }
}

impl RecordDraft {
    pub fn validate(self) -> Result<Record, DomainError> {
        Record::new(
            &self.fqdn,
            &self.address,
            self.record_type,
            self.class,
            self.ttl,
        )
    }
}

impl TryFrom<RecordDraft> for Record {
    type Error = DomainError;

    fn try_from(draft: RecordDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

impl From<&Record> for RecordDraft {
    fn from(record: &Record) -> Self {
        Self {
            fqdn: record.name.clone(),
            address: record.address.clone(),
            record_type: record.record_type,
            class: record.class,
            ttl: record.ttl,
        }
    }
}

impl Record {
    pub fn new(
        name: &str,
        address: &str,
        record_type: RecordType,
        class: RecordClass,
        ttl: u32,
    ) -> Result<Self, DomainError> {
        validate_domain_name(name)?;

        let ip: IpAddr = address
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidIpAddress(address.to_string()))?;

        if !record_type.matches(&ip) {
            return Err(DomainError::InvalidAddressFamily {
                address: ip.to_string(),
                record_type: record_type.to_string(),
            });
        }

        Ok(Self {
            name: normalize_name(name),
            address: ip.to_string(),
            record_type,
            class,
            ttl,
        })
    }

    /// Builds a candidate record from an add-shaped update RR. The owner name
    /// and TTL come from the RR header.
    pub fn from_update_rr(rr: &UpdateRecord) -> Result<Self, DomainError> {
        let record_type = RecordType::from_u16(rr.rtype)
            .ok_or_else(|| DomainError::UnsupportedRecordType(format!("TYPE{}", rr.rtype)))?;

        let ip = match &rr.data {
            UpdateData::Address(ip) => *ip,
            UpdateData::Empty | UpdateData::Other => {
                return Err(DomainError::InvalidIpAddress(format!(
                    "{} {} record carries no address",
                    rr.name, record_type
                )))
            }
        };

        Self::new(
            &rr.name,
            &ip.to_string(),
            record_type,
            RecordClass::IN,
            rr.ttl,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn ip(&self) -> Option<IpAddr> {
        self.address.parse().ok()
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    pub fn class(&self) -> RecordClass {
        self.class
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn storage_key(&self) -> StorageKey {
        StorageKey::from_normalized(&self.name, self.record_type)
    }

    /// Presentation form: `<name>. <ttl> <class> <type> <address>`.
    pub fn to_presentation(&self) -> String {
        self.to_string()
    }

    pub fn to_wire_rr(&self) -> Result<ResourceRecord, DomainError> {
        ResourceRecord::parse(&self.to_presentation())
    }

    pub fn to_store_value(&self) -> Result<String, DomainError> {
        serde_json::to_string(self).map_err(|e| DomainError::SerializationError(e.to_string()))
    }

    pub fn from_store_value(value: &str) -> Result<Self, DomainError> {
        serde_json::from_str(value).map_err(|e| DomainError::SerializationError(e.to_string()))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} {} {} {}",
            self.name, self.ttl, self.class, self.record_type, self.address
        )
    }
}
