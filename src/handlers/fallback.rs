//! Problem responses for requests no route accepts.

use crate::problem;
use crate::problem::Problem;
use axum::http::{Method, StatusCode, Uri};

pub async fn not_found(uri: Uri) -> Problem {
    problem!(StatusCode::NOT_FOUND, "no route for {}", uri.path())
}

pub async fn method_not_allowed(method: Method, uri: Uri) -> Problem {
    problem!(
        StatusCode::METHOD_NOT_ALLOWED,
        "method {} not allowed for {}",
        method,
        uri.path()
    )
}
