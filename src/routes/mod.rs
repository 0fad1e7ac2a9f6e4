//! Router assembly.

pub mod common;
pub mod entity;

pub use common::{common_routes, common_routes_with_ready};
pub use entity::entity_routes;

use crate::entity::Website;
use crate::handlers::fallback::not_found;
use crate::middleware::log_requests;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, middleware::from_fn, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub const WEBSITES_PATH: &str = "/websites";

/// The websites service: CRUD under [`WEBSITES_PATH`], common routes at the root, request
/// logging and a body size limit on everything. Unknown paths get a 404 problem.
pub fn app(state: AppState<Website>, max_body_bytes: usize) -> Router {
    Router::new()
        .nest(WEBSITES_PATH, entity_routes(state.clone()))
        .merge(common_routes_with_ready(state))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(from_fn(log_requests)),
        )
}
