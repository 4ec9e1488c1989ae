pub mod record;
pub mod record_class;
pub mod record_type;
pub mod storage_key;
pub mod update;

pub use record::{Record, RecordDraft, DEFAULT_RECORD_TTL};
pub use record_class::RecordClass;
pub use record_type::RecordType;
pub use storage_key::StorageKey;
pub use update::UpdateOperation;
