use super::*;
use crate::error::{AppError, AppResult, RequestError};
use std::time::Duration;

fn ok(status: u16) -> RequestResult {
    RequestResult::response(status, Duration::from_millis(5))
}

fn transport_failure() -> RequestResult {
    RequestResult::failure(
        RequestError::Transport {
            message: "connection refused".to_owned(),
        },
        Duration::from_millis(1),
    )
}

#[test]
fn collector_counts_status_codes_and_errors() -> AppResult<()> {
    let mut collector = ResultCollector::new(6)?;
    for result in [
        ok(200),
        ok(200),
        ok(404),
        ok(503),
        transport_failure(),
        RequestResult::failure(
            RequestError::Timeout {
                timeout: Duration::from_secs(30),
            },
            Duration::from_secs(30),
        ),
    ] {
        collector.record(&result);
    }
    let report = collector.finish(Duration::from_secs(1));

    if report.total_requests != 6 || report.success_requests != 2 {
        return Err(AppError::validation(format!(
            "Unexpected totals: {} / {}",
            report.total_requests, report.success_requests
        )));
    }
    if report.status_codes.get(&ERROR_STATUS) != Some(&2) {
        return Err(AppError::validation("Expected two errors under status 0"));
    }
    if report.timeout_requests != 1 {
        return Err(AppError::validation("Expected one timeout"));
    }
    let histogram_total: u64 = report.status_codes.values().sum();
    if histogram_total != report.total_requests {
        return Err(AppError::validation("Histogram does not sum to total"));
    }
    if report.status_codes.get(&SUCCESS_STATUS).copied() != Some(report.success_requests) {
        return Err(AppError::validation("Success count must match status 200"));
    }
    if !report.completed {
        return Err(AppError::validation("Expected report to be complete"));
    }
    Ok(())
}

#[test]
fn collector_emits_progress_every_hundred_and_at_end() -> AppResult<()> {
    let mut collector = ResultCollector::new(250)?;
    let mut notifications = Vec::new();
    for _ in 0..250 {
        if let Some(progress) = collector.record(&ok(200)) {
            notifications.push(progress.completed);
        }
    }
    if notifications != vec![100, 200, 250] {
        return Err(AppError::validation(format!(
            "Unexpected progress points: {:?}",
            notifications
        )));
    }
    Ok(())
}

#[test]
fn progress_for_small_runs_only_at_end() -> AppResult<()> {
    let due: Vec<u64> = (1..=3)
        .filter(|completed| should_report_progress(*completed, 3))
        .collect();
    if due != vec![3] {
        return Err(AppError::validation(format!("Unexpected: {:?}", due)));
    }
    if should_report_progress(0, 0) {
        return Err(AppError::validation("Zero completions never report"));
    }
    Ok(())
}

#[test]
fn partial_report_is_marked_incomplete() -> AppResult<()> {
    let mut collector = ResultCollector::new(10)?;
    collector.record(&ok(200));
    let report = collector.finish(Duration::from_millis(10));
    if report.completed {
        return Err(AppError::validation("Expected incomplete report"));
    }
    if report.expected_requests != 10 || report.total_requests != 1 {
        return Err(AppError::validation("Unexpected counts on partial report"));
    }
    Ok(())
}

#[test]
fn report_rates_use_fixed_point() -> AppResult<()> {
    let mut collector = ResultCollector::new(200)?;
    for index in 0..200 {
        let status = if index < 191 { 200 } else { 500 };
        collector.record(&ok(status));
    }
    let report = collector.finish(Duration::from_secs(4));

    if report.success_rate_x100() != 9_550 {
        return Err(AppError::validation(format!(
            "Unexpected success rate: {}",
            report.success_rate_x100()
        )));
    }
    if report.requests_per_sec_x100() != 5_000 {
        return Err(AppError::validation(format!(
            "Unexpected throughput: {}",
            report.requests_per_sec_x100()
        )));
    }
    if report.share_x100(9) != 450 {
        return Err(AppError::validation("Unexpected status share"));
    }
    Ok(())
}

#[test]
fn empty_report_has_zero_rates() -> AppResult<()> {
    let report = ResultCollector::new(1)?.finish(Duration::ZERO);
    if report.success_rate_x100() != 0 || report.requests_per_sec_x100() != 0 {
        return Err(AppError::validation("Expected zero rates for empty report"));
    }
    if report.latency != LatencySummary::default() {
        return Err(AppError::validation("Expected empty latency summary"));
    }
    Ok(())
}

#[test]
fn histogram_summary_tracks_bounds() -> AppResult<()> {
    let mut histogram = LatencyHistogram::new()?;
    for value in [1_000, 2_000, 3_000, 4_000] {
        histogram.record(value);
    }
    let summary = histogram.summary();
    if summary.avg_us != 2_500 {
        return Err(AppError::validation(format!(
            "Unexpected avg: {}",
            summary.avg_us
        )));
    }
    if summary.min_us > 1_000 || summary.max_us < 4_000 {
        return Err(AppError::validation(format!(
            "Unexpected bounds: {:?}",
            summary
        )));
    }
    if histogram.count() != 4 {
        return Err(AppError::validation("Unexpected count"));
    }
    Ok(())
}

#[test]
fn request_result_reports_zero_status_on_error() -> AppResult<()> {
    let failure = transport_failure();
    if failure.status_code() != ERROR_STATUS || failure.error().is_none() {
        return Err(AppError::validation("Failure must map to status 0"));
    }
    let success = ok(204);
    if success.status_code() != 204 || success.error().is_some() {
        return Err(AppError::validation("Response must keep its status"));
    }
    Ok(())
}
