use axum::extract::FromRequest;

use crate::errors::ApiError;

/// `Json` whose rejections are rendered as `{ "error": ... }` like every
/// other failure.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
