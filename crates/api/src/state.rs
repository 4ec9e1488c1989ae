use addd_application::use_cases::{
    CreateRecordUseCase, DeleteRecordUseCase, GetRecordsUseCase, UpdateRecordUseCase,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct RecordUseCases {
    pub get_records: Arc<GetRecordsUseCase>,
    pub create_record: Arc<CreateRecordUseCase>,
    pub update_record: Arc<UpdateRecordUseCase>,
    pub delete_record: Arc<DeleteRecordUseCase>,
}

#[derive(Clone)]
pub struct AppState {
    pub records: RecordUseCases,
    /// Shared secret expected in `X-Auth-Token`; `None` disables the check.
    pub api_token: Option<Arc<str>>,
}
