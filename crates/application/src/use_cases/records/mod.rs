mod create_record;
mod delete_record;
mod get_records;
mod update_record;

pub use create_record::CreateRecordUseCase;
pub use delete_record::DeleteRecordUseCase;
pub use get_records::GetRecordsUseCase;
pub use update_record::{RecordChanges, UpdateRecordUseCase};
