use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Address {address} does not match record type {record_type}")]
    InvalidAddressFamily {
        address: String,
        record_type: String,
    },

    #[error("Unsupported record type: {0}")]
    UnsupportedRecordType(String),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Record already exists: {0}")]
    RecordAlreadyExists(String),

    #[error("Record does not match request path: {0}")]
    RecordMismatch(String),

    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Record store read failed: {0}")]
    StoreReadFailed(String),

    #[error("Record store write failed: {0}")]
    StoreWriteFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("TSIG verification failed: {0}")]
    SignatureVerificationFailed(String),

    #[error("No advertisable address found for the nameserver")]
    NoAdvertisableAddress,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
