//! addd Domain Layer
pub mod config;
pub mod dns_message;
pub mod dns_name;
pub mod dns_record;
pub mod errors;
pub mod resource_record;
pub mod zone;

pub use config::Config;
pub use dns_message::{
    DnsClass, Opcode, QueryType, Question, Rcode, TsigAlgorithm, TsigSigning, TsigStatus,
    UpdateData, UpdateRecord, ZoneRequest, ZoneResponse,
};
pub use dns_record::{
    Record, RecordClass, RecordDraft, RecordType, StorageKey, UpdateOperation,
    DEFAULT_RECORD_TTL,
};
pub use errors::DomainError;
pub use resource_record::{RData, ResourceRecord, SoaData};
pub use zone::Zone;
