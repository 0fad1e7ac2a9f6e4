//! Config validation: table naming rules and numeric ranges.

use crate::config::{AppConfig, MAX_PAGE_LIMIT};
use crate::error::ConfigError;
use regex::Regex;

/// DynamoDB table names: 3 to 255 of `a-z A-Z 0-9 _ - .`
const TABLE_NAME_PATTERN: &str = r"^[A-Za-z0-9_.\-]{3,255}$";

pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let re = Regex::new(TABLE_NAME_PATTERN)
        .map_err(|e| ConfigError::Validation(format!("table name pattern: {}", e)))?;
    if !re.is_match(&config.store.table_name) {
        return Err(ConfigError::Validation(format!(
            "invalid table name: {}",
            config.store.table_name
        )));
    }

    if let Some(endpoint) = &config.store.endpoint {
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "endpoint must be an http(s) URL: {}",
                endpoint
            )));
        }
    }

    if config.store.timeout_ms == Some(0) {
        return Err(ConfigError::Validation("dynamodb timeout must be positive".into()));
    }

    let server = &config.server;
    if !(1..=MAX_PAGE_LIMIT).contains(&server.page_limit) {
        return Err(ConfigError::Validation(format!(
            "page limit must be between 1 and {}, got {}",
            MAX_PAGE_LIMIT, server.page_limit
        )));
    }
    if server.request_timeout_ms == 0 {
        return Err(ConfigError::Validation("request timeout must be positive".into()));
    }
    if server.max_body_bytes == 0 {
        return Err(ConfigError::Validation("max body size must be positive".into()));
    }
    Ok(())
}
