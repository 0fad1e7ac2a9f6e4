//! tracing-subscriber setup for binaries.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "dynamo_crud=info";

/// Installs a fmt subscriber filtered by `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
/// A second call is a no-op.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
