//! Success envelopes. Failures are rendered by [`crate::problem::Problem`].

use crate::repository::Page;
use crate::store::key_id;
use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Body of a list response.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    /// Pass back as `exclusive_start_key` to fetch the next page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_evaluated_key: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub scanned_count: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T> From<Page<T>> for ListResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            last_evaluated_key: page
                .next_cursor
                .as_ref()
                .and_then(key_id)
                .map(str::to_owned),
            scanned_count: page.scanned_count,
            items: page.items,
        }
    }
}

pub fn list_ok<T: Serialize>(page: Page<T>) -> (StatusCode, Json<ListResponse<T>>) {
    (StatusCode::OK, Json(page.into()))
}

pub fn created<T: Serialize>(entity: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(entity))
}

pub fn ok<T: Serialize>(entity: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(entity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::k1;
    use serde_json::json;

    #[test]
    fn list_envelope_omits_empty_cursor_and_count() {
        let page = Page::<u8> {
            items: vec![],
            next_cursor: None,
            scanned_count: 0,
        };
        let body = serde_json::to_value(ListResponse::from(page)).unwrap();
        assert_eq!(body, json!({"items": []}));
    }

    #[test]
    fn list_envelope_exposes_cursor_id() {
        let page = Page {
            items: vec![1, 2],
            next_cursor: Some(k1("b")),
            scanned_count: 2,
        };
        let body = serde_json::to_value(ListResponse::from(page)).unwrap();
        assert_eq!(
            body,
            json!({"items": [1, 2], "last_evaluated_key": "b", "scanned_count": 2})
        );
    }
}
