use hdrhistogram::Histogram;

use crate::error::MetricsError;

use super::types::LatencySummary;

/// Latency distribution in microseconds.
#[derive(Debug)]
pub struct LatencyHistogram {
    hist: Histogram<u64>,
    sum_us: u128,
}

impl LatencyHistogram {
    /// Create a new latency histogram.
    ///
    /// # Errors
    ///
    /// Returns an error if the histogram cannot be created.
    pub fn new() -> Result<Self, MetricsError> {
        let hist = Histogram::<u64>::new(3)
            .map_err(|err| MetricsError::CreateHistogram { source: err })?;
        Ok(Self { hist, sum_us: 0 })
    }

    pub fn record(&mut self, latency_us: u64) {
        let value = latency_us.max(1);
        self.hist.saturating_record(value);
        self.sum_us = self.sum_us.saturating_add(u128::from(value));
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.hist.len()
    }

    #[must_use]
    pub fn summary(&self) -> LatencySummary {
        let count = self.count();
        if count == 0 {
            return LatencySummary::default();
        }
        let avg = self
            .sum_us
            .checked_div(u128::from(count))
            .unwrap_or(0);
        LatencySummary {
            min_us: self.hist.min(),
            avg_us: u64::try_from(avg).unwrap_or(u64::MAX),
            max_us: self.hist.max(),
            p50_us: self.hist.value_at_quantile(0.5),
            p90_us: self.hist.value_at_quantile(0.9),
            p99_us: self.hist.value_at_quantile(0.99),
        }
    }
}
