//! Router assembly. Every router is built from an explicit `AppState`.

mod common;
mod lunchly;

pub use common::operational_routes;
pub use lunchly::lunchly_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Form bodies are tiny; anything larger is rejected before parsing.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Full application: health endpoints plus the customer and reservation pages.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(operational_routes(state.clone()))
        .merge(lunchly_routes(state))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}
