pub mod dns;
pub mod records;

pub use dns::HandleZoneRequestUseCase;
pub use records::{
    CreateRecordUseCase, DeleteRecordUseCase, GetRecordsUseCase, RecordChanges,
    UpdateRecordUseCase,
};
