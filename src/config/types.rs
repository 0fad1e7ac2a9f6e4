//! Typed settings, constructed once at startup and injected where needed.

use std::time::Duration;

/// Where the items live and how to reach the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct StoreConfig {
    pub table_name: String,
    /// Overrides the SDK default region when set.
    pub region: Option<String>,
    /// Endpoint override, e.g. DynamoDB Local.
    pub endpoint: Option<String>,
    /// Per-operation timeout applied by the SDK.
    pub timeout_ms: Option<u64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Page size when a list request has no `limit`.
    pub page_limit: i32,
    pub request_timeout_ms: u64,
    pub max_body_bytes: usize,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.into(),
            page_limit: DEFAULT_PAGE_LIMIT,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub server: ServerConfig,
}

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_PAGE_LIMIT: i32 = 25;
pub const MAX_PAGE_LIMIT: i32 = 1000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;
