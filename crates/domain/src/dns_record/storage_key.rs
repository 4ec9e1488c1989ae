use super::RecordType;
use crate::dns_name::{normalize_name, reverse_labels, validate_domain_name};
use crate::errors::DomainError;
use std::fmt;

/// Key under which a record is persisted.
///
/// Labels of the normalized name are reversed and the type is appended, so
/// `www.example.com` / `A` becomes `com.example.www_A`. Every store engine keeps
/// this string bit-for-bit; it is the only lookup path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn new(name: &str, record_type: RecordType) -> Result<Self, DomainError> {
        validate_domain_name(name)?;
        Ok(Self::from_normalized(&normalize_name(name), record_type))
    }

    pub(crate) fn from_normalized(name: &str, record_type: RecordType) -> Self {
        Self(format!("{}_{}", reverse_labels(name), record_type.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
