use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
}

/// Failure of a single request. Carried inside a result instead of being
/// propagated, so it is cheap to clone and holds no live resources.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Failed to build request: {message}")]
    Build { message: String },
    #[error("Request timed out after {}ms", timeout.as_millis())]
    Timeout { timeout: Duration },
    #[error("Request failed: {message}")]
    Transport { message: String },
}

impl RequestError {
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, RequestError::Timeout { .. })
    }
}
