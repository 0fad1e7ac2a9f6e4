//! Request logging: one line per request with method, path, status and error text.

use crate::problem::ProblemText;
use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::info;

/// Logs after the response is built. For problem responses the status equals the problem's
/// status and the problem text is attached as `error`.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis() as u64;
    match response.extensions().get::<ProblemText>() {
        Some(ProblemText(error)) => {
            info!(status, duration_ms, error = %error, "{} {}", method, path)
        }
        None => info!(status, duration_ms, "{} {}", method, path),
    }

    response
}
