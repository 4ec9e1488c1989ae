pub mod record;

pub use record::{
    RecordChangeResponse, RecordListResponse, RecordUpdatedResponse, UpdateRecordRequest,
};
