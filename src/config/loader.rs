//! Load [`AppConfig`] from environment variables.
//!
//! | variable                      | meaning                                          |
//! |-------------------------------|--------------------------------------------------|
//! | `TABLE_NAME`                  | DynamoDB table (required)                        |
//! | `AWS_REGION`                  | region override                                  |
//! | `AWS_SAM_LOCAL`               | `true` to use `AWS_DYNAMODB_LOCAL_ENDPOINT`      |
//! | `AWS_DYNAMODB_LOCAL_ENDPOINT` | local endpoint, required when SAM local is on    |
//! | `DYNAMODB_TIMEOUT_MS`         | SDK operation timeout                            |
//! | `BIND_ADDR`                   | listen address, default `0.0.0.0:3000`           |
//! | `PAGE_LIMIT`                  | default page size, default 25                    |
//! | `REQUEST_TIMEOUT_MS`          | per-request deadline, default 10000              |
//! | `MAX_BODY_BYTES`              | request body limit, default 1 MiB                |

use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use std::str::FromStr;

pub const ENV_TABLE_NAME: &str = "TABLE_NAME";
pub const ENV_AWS_REGION: &str = "AWS_REGION";
pub const ENV_AWS_SAM_LOCAL: &str = "AWS_SAM_LOCAL";
pub const ENV_DYNAMODB_LOCAL_ENDPOINT: &str = "AWS_DYNAMODB_LOCAL_ENDPOINT";
pub const ENV_DYNAMODB_TIMEOUT_MS: &str = "DYNAMODB_TIMEOUT_MS";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_PAGE_LIMIT: &str = "PAGE_LIMIT";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "REQUEST_TIMEOUT_MS";
pub const ENV_MAX_BODY_BYTES: &str = "MAX_BODY_BYTES";

/// Reads the process environment, then validates.
pub fn load_from_env() -> Result<AppConfig, ConfigError> {
    load_with(|key| std::env::var(key).ok())
}

/// Same as [`load_from_env`] with an arbitrary variable lookup.
pub fn load_with<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let table_name = get(ENV_TABLE_NAME).ok_or(ConfigError::Missing(ENV_TABLE_NAME))?;
    let endpoint = if get(ENV_AWS_SAM_LOCAL).as_deref() == Some("true") {
        let endpoint = get(ENV_DYNAMODB_LOCAL_ENDPOINT)
            .ok_or(ConfigError::Missing(ENV_DYNAMODB_LOCAL_ENDPOINT))?;
        Some(endpoint)
    } else {
        None
    };

    let defaults = ServerConfig::default();
    let config = AppConfig {
        store: StoreConfig {
            table_name,
            region: get(ENV_AWS_REGION),
            endpoint,
            timeout_ms: parse_opt(ENV_DYNAMODB_TIMEOUT_MS, get(ENV_DYNAMODB_TIMEOUT_MS))?,
        },
        server: ServerConfig {
            bind_addr: get(ENV_BIND_ADDR).unwrap_or(defaults.bind_addr),
            page_limit: parse_opt(ENV_PAGE_LIMIT, get(ENV_PAGE_LIMIT))?
                .unwrap_or(defaults.page_limit),
            request_timeout_ms: parse_opt(ENV_REQUEST_TIMEOUT_MS, get(ENV_REQUEST_TIMEOUT_MS))?
                .unwrap_or(defaults.request_timeout_ms),
            max_body_bytes: parse_opt(ENV_MAX_BODY_BYTES, get(ENV_MAX_BODY_BYTES))?
                .unwrap_or(defaults.max_body_bytes),
        },
    };
    validate(&config)?;
    Ok(config)
}

fn parse_opt<T>(key: &'static str, raw: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.map(|v| {
        v.parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            message: format!("{:?}: {}", v, e),
        })
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        load_with(|k| vars.get(k).cloned())
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = load(&[(ENV_TABLE_NAME, "websites")]).unwrap();
        assert_eq!(config.store.table_name, "websites");
        assert_eq!(config.store.endpoint, None);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn table_name_is_required() {
        assert!(matches!(load(&[]), Err(ConfigError::Missing(ENV_TABLE_NAME))));
        assert!(matches!(
            load(&[(ENV_TABLE_NAME, "  ")]),
            Err(ConfigError::Missing(ENV_TABLE_NAME))
        ));
    }

    #[test]
    fn sam_local_uses_local_endpoint() {
        let config = load(&[
            (ENV_TABLE_NAME, "websites"),
            (ENV_AWS_SAM_LOCAL, "true"),
            (ENV_DYNAMODB_LOCAL_ENDPOINT, "http://dynamodb:8000"),
        ])
        .unwrap();
        assert_eq!(config.store.endpoint.as_deref(), Some("http://dynamodb:8000"));
    }

    #[test]
    fn local_endpoint_ignored_without_sam_local() {
        let config = load(&[
            (ENV_TABLE_NAME, "websites"),
            (ENV_DYNAMODB_LOCAL_ENDPOINT, "http://dynamodb:8000"),
        ])
        .unwrap();
        assert_eq!(config.store.endpoint, None);
    }

    #[test]
    fn sam_local_without_endpoint_fails() {
        let err = load(&[(ENV_TABLE_NAME, "websites"), (ENV_AWS_SAM_LOCAL, "true")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ENV_DYNAMODB_LOCAL_ENDPOINT)));
    }

    #[test]
    fn numbers_are_parsed() {
        let config = load(&[
            (ENV_TABLE_NAME, "websites"),
            (ENV_PAGE_LIMIT, "50"),
            (ENV_DYNAMODB_TIMEOUT_MS, "3000"),
            (ENV_REQUEST_TIMEOUT_MS, "2500"),
        ])
        .unwrap();
        assert_eq!(config.server.page_limit, 50);
        assert_eq!(config.store.timeout_ms, Some(3000));
        assert_eq!(config.server.request_timeout_ms, 2500);
    }

    #[test]
    fn garbage_number_is_invalid() {
        let err = load(&[(ENV_TABLE_NAME, "websites"), (ENV_PAGE_LIMIT, "many")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_PAGE_LIMIT, .. }));
    }
}
