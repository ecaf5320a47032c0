//! Router assembly.

mod catalog;
mod common;

pub use catalog::catalog_routes;
pub use common::common_routes;

use crate::handlers::not_found;
use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Form bodies are tiny; anything larger is refused.
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Full application router: catalog and common routes, 404 fallback, body limit and request tracing.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(catalog_routes(state))
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
}
