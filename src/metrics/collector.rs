use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::MetricsError;

use super::histogram::LatencyHistogram;
use super::types::{ERROR_STATUS, Progress, Report, RequestResult, SUCCESS_STATUS};

/// Completed results between two progress notifications.
pub const PROGRESS_INTERVAL: u64 = 100;

#[must_use]
pub const fn should_report_progress(completed: u64, total: u64) -> bool {
    completed > 0 && (completed % PROGRESS_INTERVAL == 0 || completed == total)
}

/// Running counters for one run. Single consumer; results may arrive in any
/// order since every update is a pure count.
#[derive(Debug)]
pub struct ResultCollector {
    expected: u64,
    started_at: DateTime<Utc>,
    total_requests: u64,
    success_requests: u64,
    timeout_requests: u64,
    status_codes: BTreeMap<u16, u64>,
    latency: LatencyHistogram,
}

impl ResultCollector {
    /// Creates an empty collector expecting `expected` results.
    ///
    /// # Errors
    ///
    /// Returns an error if the latency histogram cannot be allocated.
    pub fn new(expected: u64) -> Result<Self, MetricsError> {
        Ok(Self {
            expected,
            started_at: Utc::now(),
            total_requests: 0,
            success_requests: 0,
            timeout_requests: 0,
            status_codes: BTreeMap::new(),
            latency: LatencyHistogram::new()?,
        })
    }

    /// Folds one result into the counters. Returns a progress notification
    /// every [`PROGRESS_INTERVAL`] results and on the last expected one.
    pub fn record(&mut self, result: &RequestResult) -> Option<Progress> {
        self.total_requests = self.total_requests.saturating_add(1);

        let code = match &result.outcome {
            Ok(status) => {
                if *status == SUCCESS_STATUS {
                    self.success_requests = self.success_requests.saturating_add(1);
                }
                *status
            }
            Err(err) => {
                if err.is_timeout() {
                    self.timeout_requests = self.timeout_requests.saturating_add(1);
                }
                ERROR_STATUS
            }
        };
        let count = self.status_codes.entry(code).or_insert(0);
        *count = count.saturating_add(1);

        let latency_us = u64::try_from(result.duration.as_micros()).unwrap_or(u64::MAX);
        self.latency.record(latency_us);

        should_report_progress(self.total_requests, self.expected).then_some(Progress {
            completed: self.total_requests,
            total: self.expected,
        })
    }

    #[must_use]
    pub const fn completed(&self) -> u64 {
        self.total_requests
    }

    #[must_use]
    pub const fn expected(&self) -> u64 {
        self.expected
    }

    #[must_use]
    pub fn finish(self, total_time: Duration) -> Report {
        Report {
            started_at: self.started_at,
            total_time,
            expected_requests: self.expected,
            total_requests: self.total_requests,
            success_requests: self.success_requests,
            timeout_requests: self.timeout_requests,
            status_codes: self.status_codes,
            latency: self.latency.summary(),
            completed: self.total_requests == self.expected,
        }
    }
}
