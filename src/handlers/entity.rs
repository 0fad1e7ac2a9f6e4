//! Entity CRUD handlers: list, create, read, update, delete.
//!
//! Handlers are generic over [`Entity`]; the entity type is fixed when the routes are built.
//! Every store call runs under a fresh [`Context`] bounded by the request timeout.

use crate::config::MAX_PAGE_LIMIT;
use crate::context::Context;
use crate::entity::Entity;
use crate::problem;
use crate::problem::Problem;
use crate::response::{created, list_ok, ok};
use crate::state::AppState;
use crate::store::k1;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::error::Error as StdError;

const ERR_UNMARSHAL_REQUEST: &str = "failed to unmarshal request";
const ERR_INVALID_ID: &str = "primary key is required";

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// `pk` of the last item of the previous page.
    pub exclusive_start_key: Option<String>,
    pub limit: Option<i32>,
}

/// Keeps the rejection's own client error status (413 for an oversize body, 415 for a missing
/// content type); anything else is a 400.
fn unmarshal_error<R>(status: StatusCode, rejection: R) -> Problem
where
    R: StdError + Send + Sync + 'static,
{
    let status = if status.is_client_error() {
        status
    } else {
        StatusCode::BAD_REQUEST
    };
    let detail = format!("{}: {}", ERR_UNMARSHAL_REQUEST, rejection);
    Problem::wrap(rejection, status, ERR_UNMARSHAL_REQUEST).with_detail(detail)
}

fn required_id(id: String) -> Result<String, Problem> {
    if id.trim().is_empty() {
        return Err(Problem::bad_request(ERR_INVALID_ID).with_detail(ERR_INVALID_ID));
    }
    Ok(id)
}

fn request_context<E>(state: &AppState<E>) -> Context {
    Context::with_timeout(state.request_timeout)
}

pub async fn list<E: Entity>(
    State(state): State<AppState<E>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<impl IntoResponse, Problem> {
    let Query(params) = params.map_err(|r| unmarshal_error(r.status(), r))?;
    let limit = params.limit.unwrap_or(state.page_limit).min(MAX_PAGE_LIMIT);
    let cursor = params
        .exclusive_start_key
        .filter(|k| !k.is_empty())
        .map(k1);

    let page = state
        .repo
        .list(&request_context(&state), limit, cursor)
        .await?;
    Ok(list_ok(page))
}

pub async fn create<E: Entity>(
    State(state): State<AppState<E>>,
    body: Result<Json<E>, JsonRejection>,
) -> Result<impl IntoResponse, Problem> {
    let Json(mut entity) = body.map_err(|r| unmarshal_error(r.status(), r))?;
    if !entity.id().is_empty() {
        let p = problem!(
            StatusCode::BAD_REQUEST,
            "primary key is not allowed when creating entity: {}",
            entity.id()
        );
        return Err(p);
    }

    entity.set_id(state.ids.new_string());
    state.repo.create(&request_context(&state), &entity).await?;
    tracing::debug!(entity = E::NAME, id = %entity.id(), "created");
    Ok(created(entity))
}

pub async fn read<E: Entity>(
    State(state): State<AppState<E>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, Problem> {
    let Path(id) = id.map_err(|r| unmarshal_error(r.status(), r))?;
    let id = required_id(id)?;

    match state.repo.get(&request_context(&state), k1(&id)).await? {
        Some(entity) => Ok(ok(entity)),
        None => Err(problem!(StatusCode::NOT_FOUND, "{} not found: {}", E::NAME, id)),
    }
}

/// The body may omit the identity field; when present it must equal the path id.
pub async fn update<E: Entity>(
    State(state): State<AppState<E>>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<E>, JsonRejection>,
) -> Result<impl IntoResponse, Problem> {
    let Path(id) = id.map_err(|r| unmarshal_error(r.status(), r))?;
    let id = required_id(id)?;
    let Json(mut entity) = body.map_err(|r| unmarshal_error(r.status(), r))?;

    if entity.id().is_empty() {
        entity.set_id(id);
    } else if entity.id() != id {
        return Err(problem!(
            StatusCode::BAD_REQUEST,
            "primary key mismatch: path {}, body {}",
            id,
            entity.id()
        ));
    }

    state.repo.update(&request_context(&state), &entity).await?;
    Ok(ok(entity))
}

pub async fn delete<E: Entity>(
    State(state): State<AppState<E>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, Problem> {
    let Path(id) = id.map_err(|r| unmarshal_error(r.status(), r))?;
    let id = required_id(id)?;

    state.repo.delete(&request_context(&state), k1(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
