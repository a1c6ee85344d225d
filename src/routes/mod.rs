//! Router assembly: method + path, then the guard chain, then the handler.
//! Guards listed first in a `ServiceBuilder` run first.

mod common;
mod developers;
mod projects;

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::TraceLayer;

/// Largest accepted request body, in bytes. Enforced where bodies are read: by the guards
/// that inspect them and by `JsonBody`, both answering 413.
pub const BODY_LIMIT: usize = 1024 * 1024;

/// The full API with tracing and the body limit applied.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common::routes())
        .merge(developers::routes(&state))
        .merge(projects::routes(&state))
        .with_state(state)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
}
