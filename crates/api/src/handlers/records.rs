use addd_domain::{DomainError, Record, RecordDraft, RecordType};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tracing::debug;

use crate::{
    dto::{RecordChangeResponse, RecordListResponse, RecordUpdatedResponse, UpdateRecordRequest},
    errors::ApiError,
    extract::ApiJson,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/records", get(get_all_records).post(create_record))
        .route("/records/defaults", get(get_defaults))
        .route(
            "/records/{name}/{type}",
            get(get_record).put(update_record).delete(delete_record),
        )
}

fn parse_type(raw: &str) -> Result<RecordType, ApiError> {
    raw.parse::<RecordType>()
        .map_err(|e| ApiError(DomainError::UnsupportedRecordType(e)))
}

async fn get_all_records(
    State(state): State<AppState>,
) -> Result<Json<RecordListResponse>, ApiError> {
    let records = state.records.get_records.get_all().await?;
    debug!(count = records.len(), "Records retrieved successfully");
    Ok(Json(RecordListResponse { records }))
}

async fn get_defaults() -> Json<RecordDraft> {
    Json(RecordDraft::default())
}

async fn get_record(
    State(state): State<AppState>,
    Path((name, record_type)): Path<(String, String)>,
) -> Result<Json<Record>, ApiError> {
    let record_type = parse_type(&record_type)?;
    let record = state.records.get_records.get(&name, record_type).await?;
    Ok(Json(record))
}

async fn create_record(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<RecordDraft>,
) -> Result<(StatusCode, Json<RecordChangeResponse>), ApiError> {
    let record = state.records.create_record.execute(draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(RecordChangeResponse::created(record)),
    ))
}

async fn update_record(
    State(state): State<AppState>,
    Path((name, record_type)): Path<(String, String)>,
    ApiJson(req): ApiJson<UpdateRecordRequest>,
) -> Result<Json<RecordUpdatedResponse>, ApiError> {
    let record_type = parse_type(&record_type)?;
    let (old_record, new_record) = state
        .records
        .update_record
        .execute(&name, record_type, req.into())
        .await?;

    Ok(Json(RecordUpdatedResponse {
        status: "updated",
        old_record,
        new_record,
    }))
}

async fn delete_record(
    State(state): State<AppState>,
    Path((name, record_type)): Path<(String, String)>,
) -> Result<Json<RecordChangeResponse>, ApiError> {
    let record_type = parse_type(&record_type)?;
    let record = state
        .records
        .delete_record
        .execute(&name, record_type)
        .await?;
    Ok(Json(RecordChangeResponse::deleted(record)))
}
