//! Per-request results and their aggregation into a run report.
mod collector;
mod histogram;
mod types;

#[cfg(test)]
mod tests;

pub use collector::{PROGRESS_INTERVAL, ResultCollector, should_report_progress};
pub use histogram::LatencyHistogram;
pub use types::{ERROR_STATUS, LatencySummary, Progress, Report, RequestResult, SUCCESS_STATUS};
