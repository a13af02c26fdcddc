use std::future::Future;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;

use crate::error::{AppError, AppResult, RequestError};

use super::HttpClient;

pub(crate) fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
    runtime.block_on(future)
}

/// In-memory client: answers `status` after `delay`, except for the first
/// calls, which fail with the scripted `failures` in order.
#[derive(Debug, Default)]
pub(crate) struct FakeClient {
    status: u16,
    failures: Vec<RequestError>,
    delay: Duration,
    calls: AtomicU64,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeClient {
    pub(crate) fn with_status(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub(crate) fn failing_first(self, count: usize) -> Self {
        let failures = vec![
            RequestError::Transport {
                message: "connection refused".to_owned(),
            };
            count
        ];
        self.failing_with(failures)
    }

    pub(crate) fn failing_with(mut self, failures: Vec<RequestError>) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpClient for FakeClient {
    async fn get(&self, _url: &Url) -> Result<u16, RequestError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst).saturating_add(1);
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some(failure) = usize::try_from(call)
            .ok()
            .and_then(|index| self.failures.get(index))
        {
            return Err(failure.clone());
        }
        Ok(self.status)
    }
}
