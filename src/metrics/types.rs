use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::RequestError;

/// Histogram key used for requests that never produced an HTTP response.
pub const ERROR_STATUS: u16 = 0;
/// The only status counted as a success.
pub const SUCCESS_STATUS: u16 = 200;

/// Outcome of one ticket. Created by a worker, consumed by the collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestResult {
    pub outcome: Result<u16, RequestError>,
    pub duration: Duration,
}

impl RequestResult {
    #[must_use]
    pub const fn response(status_code: u16, duration: Duration) -> Self {
        Self {
            outcome: Ok(status_code),
            duration,
        }
    }

    #[must_use]
    pub const fn failure(error: RequestError, duration: Duration) -> Self {
        Self {
            outcome: Err(error),
            duration,
        }
    }

    /// Status code, or [`ERROR_STATUS`] when no response was obtained.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match &self.outcome {
            Ok(status) => *status,
            Err(_) => ERROR_STATUS,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&RequestError> {
        match &self.outcome {
            Ok(_) => None,
            Err(err) => Some(err),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatencySummary {
    pub min_us: u64,
    pub avg_us: u64,
    pub max_us: u64,
    pub p50_us: u64,
    pub p90_us: u64,
    pub p99_us: u64,
}

/// Final statistics of a run. Built by a single collector, read-only after.
#[derive(Debug, Clone)]
pub struct Report {
    pub started_at: DateTime<Utc>,
    pub total_time: Duration,
    pub expected_requests: u64,
    pub total_requests: u64,
    pub success_requests: u64,
    pub timeout_requests: u64,
    pub status_codes: BTreeMap<u16, u64>,
    pub latency: LatencySummary,
    pub completed: bool,
}

impl Report {
    #[must_use]
    pub fn error_requests(&self) -> u64 {
        self.status_codes
            .get(&ERROR_STATUS)
            .copied()
            .unwrap_or(0)
    }

    /// Success rate in hundredths of a percent (`9_550` is 95.50%).
    #[must_use]
    pub fn success_rate_x100(&self) -> u64 {
        ratio_x100(self.success_requests, self.total_requests)
    }

    /// Share of `count` in the total, in hundredths of a percent.
    #[must_use]
    pub fn share_x100(&self, count: u64) -> u64 {
        ratio_x100(count, self.total_requests)
    }

    /// Throughput in hundredths of a request per second.
    #[must_use]
    pub fn requests_per_sec_x100(&self) -> u64 {
        let micros = self.total_time.as_micros().max(1);
        let scaled = u128::from(self.total_requests)
            .saturating_mul(100_000_000)
            .checked_div(micros)
            .unwrap_or(0);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }
}

fn ratio_x100(part: u64, whole: u64) -> u64 {
    if whole == 0 {
        return 0;
    }
    let scaled = u128::from(part)
        .saturating_mul(10_000)
        .checked_div(u128::from(whole))
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}
