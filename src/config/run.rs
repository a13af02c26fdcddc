use std::time::Duration;

use tracing::warn;
use url::Url;

use crate::args::{DEFAULT_MAX_CONCURRENCY, DEFAULT_REQUEST_TIMEOUT, LoadArgs};
use crate::error::{AppResult, ValidationError};

/// Validated, immutable settings for a single run.
///
/// Concurrency is never larger than the request count or the hard cap, so
/// every spawned worker has at least one ticket available when the run starts.
#[derive(Debug, Clone)]
pub struct RunConfig {
    url: Url,
    requests: u64,
    requested_concurrency: usize,
    max_concurrency: usize,
    request_timeout: Duration,
}

impl RunConfig {
    /// Validates raw input into a run configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is not an absolute http(s) URL, or when
    /// `requests` or `concurrency` is zero.
    pub fn new(url: &str, requests: u64, concurrency: usize) -> Result<Self, ValidationError> {
        let url = parse_target_url(url)?;
        if requests == 0 {
            return Err(ValidationError::CountZero { field: "requests" });
        }
        if concurrency == 0 {
            return Err(ValidationError::CountZero {
                field: "concurrency",
            });
        }
        Ok(Self {
            url,
            requests,
            requested_concurrency: concurrency,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Builds a run configuration from parsed (and config-merged) arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL, request count, or concurrency is missing
    /// or invalid.
    pub fn from_args(args: &LoadArgs) -> AppResult<Self> {
        let url = args.url.as_deref().ok_or(ValidationError::MissingUrl)?;
        let requests = args
            .requests
            .ok_or(ValidationError::MissingCount { field: "requests" })?;
        let concurrency = args.concurrency.ok_or(ValidationError::MissingCount {
            field: "concurrency",
        })?;

        let config = Self::new(url, requests.get(), concurrency.get())?
            .with_request_timeout(args.request_timeout)
            .with_max_concurrency(args.max_concurrency.get());

        if config.concurrency() < config.requested_concurrency {
            warn!(
                "Concurrency {} clamped to {}.",
                config.requested_concurrency,
                config.concurrency()
            );
        }
        Ok(config)
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the hard worker cap; zero is treated as one.
    #[must_use]
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub const fn requests(&self) -> u64 {
        self.requests
    }

    /// Effective worker count: `min(concurrency, requests, max_concurrency)`.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        let by_requests = usize::try_from(self.requests).unwrap_or(usize::MAX);
        self.requested_concurrency
            .min(by_requests)
            .min(self.max_concurrency)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

fn parse_target_url(raw: &str) -> Result<Url, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingUrl);
    }
    let url = Url::parse(trimmed).map_err(|err| ValidationError::InvalidUrl {
        url: trimmed.to_owned(),
        source: err,
    })?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ValidationError::UnsupportedScheme {
                scheme: other.to_owned(),
            });
        }
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::UrlMissingHost);
    }
    Ok(url)
}
