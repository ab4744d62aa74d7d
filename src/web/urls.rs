use axum::{Router, extract::DefaultBodyLimit, routing::get};

use super::AppState;
use super::views::{show, submit};

/// Every path serves the same page: GET shows it, POST submits the form.
/// User input has no size limit, so the default body cap is lifted.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(show).post(submit))
        .route("/{*path}", get(show).post(submit))
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}
