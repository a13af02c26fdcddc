use std::time::Duration;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("loadgen/", env!("CARGO_PKG_VERSION"));

/// Per-request timeout applied by the shared client.
pub(crate) const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on spawned workers regardless of the requested concurrency.
pub(crate) const DEFAULT_MAX_CONCURRENCY: usize = 10_000;
