//! CRUD routes for one entity type, meant to be nested under the collection path.

use crate::entity::Entity;
use crate::handlers::entity::{create, delete as delete_handler, list, read, update};
use crate::handlers::fallback::method_not_allowed;
use crate::state::AppState;
use axum::{routing::get, Router};

/// `GET /` list, `POST /` create, `GET|PUT|DELETE /:id`.
pub fn entity_routes<E: Entity>(state: AppState<E>) -> Router {
    Router::new()
        .route("/", get(list::<E>).post(create::<E>))
        .route(
            "/:id",
            get(read::<E>).put(update::<E>).delete(delete_handler::<E>),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}
