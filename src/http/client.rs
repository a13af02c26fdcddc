use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::args::DEFAULT_USER_AGENT;
use crate::error::{AppError, AppResult, HttpError, RequestError};

/// Issues a single GET against the target. Implementations are shared by
/// every worker and must be safe for concurrent use.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends one GET and returns the response status code.
    ///
    /// # Errors
    ///
    /// Returns a [`RequestError`] when the request cannot be built, times out,
    /// or fails at the transport level before a status line arrives. Non-2xx
    /// responses are not errors, and neither is a body that breaks off after
    /// the status.
    async fn get(&self, url: &Url) -> Result<u16, RequestError>;
}

/// [`HttpClient`] backed by a pooled `reqwest::Client` with a fixed
/// per-request timeout.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
    timeout: Duration,
}

impl ReqwestClient {
    /// Builds the shared client.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying TLS/HTTP stack cannot be
    /// initialised.
    pub fn new(timeout: Duration, max_idle_per_host: usize) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .pool_max_idle_per_host(max_idle_per_host)
            .build()
            .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;
        Ok(Self { client, timeout })
    }

    fn classify(&self, err: &reqwest::Error) -> RequestError {
        if err.is_timeout() {
            RequestError::Timeout {
                timeout: self.timeout,
            }
        } else if err.is_builder() {
            RequestError::Build {
                message: err.to_string(),
            }
        } else {
            RequestError::Transport {
                message: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &Url) -> Result<u16, RequestError> {
        let request = self
            .client
            .get(url.clone())
            .build()
            .map_err(|err| RequestError::Build {
                message: err.to_string(),
            })?;
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|err| self.classify(&err))?;
        let status = response.status().as_u16();
        // The status is the outcome; an unread body only costs connection reuse.
        drop(response);
        Ok(status)
    }
}
