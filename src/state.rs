//! Shared state for the entity routes of one entity type.

use crate::config::{ServerConfig, MAX_PAGE_LIMIT};
use crate::id::IdGenerator;
use crate::repository::Repository;
use std::sync::Arc;
use std::time::Duration;

pub struct AppState<E> {
    pub repo: Repository<E>,
    pub ids: Arc<IdGenerator>,
    /// Page size when a list request carries no `limit`.
    pub page_limit: i32,
    /// Deadline given to every store call made by a request.
    pub request_timeout: Duration,
}

impl<E> AppState<E> {
    pub fn new(repo: Repository<E>, ids: Arc<IdGenerator>, server: &ServerConfig) -> Self {
        Self {
            repo,
            ids,
            page_limit: server.page_limit.clamp(1, MAX_PAGE_LIMIT),
            request_timeout: server.request_timeout(),
        }
    }
}

impl<E> Clone for AppState<E> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            ids: Arc::clone(&self.ids),
            page_limit: self.page_limit,
            request_timeout: self.request_timeout,
        }
    }
}
