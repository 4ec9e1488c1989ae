use crate::handlers;
use crate::middleware::require_auth_token;
use crate::state::AppState;
use axum::{middleware, routing::get, Router};

pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(handlers::records::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth_token,
        ))
        .with_state(state)
}
