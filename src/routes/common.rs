//! Common routes: health, readiness, version.

use crate::context::Context;
use crate::entity::Entity;
use crate::handlers::fallback::method_not_allowed;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    table: String,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

/// Scans a single item to prove the table is reachable.
async fn ready<E: Entity>(
    State(state): State<AppState<E>>,
) -> Result<Json<ReadyBody>, (StatusCode, Json<ReadyBody>)> {
    let table = state.repo.table_name().to_string();
    let ctx = Context::with_timeout(state.request_timeout);
    if let Err(p) = state.repo.list(&ctx, 1, None).await {
        tracing::warn!(table = %table, error = %p, "readiness check failed");
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded",
                table,
            }),
        ));
    }
    Ok(Json(ReadyBody { status: "ok", table }))
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /health, GET /version.
pub fn common_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
        .method_not_allowed_fallback(method_not_allowed)
}

/// [`common_routes`] plus GET /ready, which checks the store behind `state`.
pub fn common_routes_with_ready<E: Entity>(state: AppState<E>) -> Router {
    Router::new()
        .route("/ready", get(ready::<E>))
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .merge(common_routes())
}
