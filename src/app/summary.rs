use std::time::Duration;

use crate::metrics::{ERROR_STATUS, Report};

const RULE_WIDTH: usize = 50;

/// Human-readable report, one line per entry.
#[must_use]
pub fn summary_lines(report: &Report) -> Vec<String> {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        rule.clone(),
        "LOAD TEST REPORT".to_owned(),
        rule.clone(),
        format!("Started at: {}", report.started_at.to_rfc3339()),
        format!("Total time: {}", format_duration(report.total_time)),
        format!("Total requests: {}", report.total_requests),
        format!("Successful requests (200): {}", report.success_requests),
        format!("Success rate: {}%", format_x100(report.success_rate_x100())),
        format!(
            "Requests per second: {}",
            format_x100(report.requests_per_sec_x100())
        ),
        format!(
            "Latency (min/avg/max): {} / {} / {}",
            format_micros(report.latency.min_us),
            format_micros(report.latency.avg_us),
            format_micros(report.latency.max_us)
        ),
        format!(
            "Latency (p50/p90/p99): {} / {} / {}",
            format_micros(report.latency.p50_us),
            format_micros(report.latency.p90_us),
            format_micros(report.latency.p99_us)
        ),
    ];
    if report.timeout_requests > 0 {
        lines.push(format!("Timeouts: {}", report.timeout_requests));
    }
    if !report.completed {
        lines.push(format!(
            "Run incomplete: {}/{} requests finished",
            report.total_requests, report.expected_requests
        ));
    }

    lines.push(String::new());
    lines.push("Status code distribution:".to_owned());
    for (code, count) in &report.status_codes {
        let share = format_x100(report.share_x100(*count));
        if *code == ERROR_STATUS {
            lines.push(format!("  Errors: {} ({}%)", count, share));
        } else {
            lines.push(format!("  {}: {} ({}%)", code, count, share));
        }
    }
    lines.push(rule);
    lines
}

#[must_use]
pub fn render_text(report: &Report) -> String {
    let mut output = summary_lines(report).join("\n");
    output.push('\n');
    output
}

pub(crate) fn format_x100(value: u64) -> String {
    format!("{}.{:02}", value / 100, value % 100)
}

fn format_micros(value_us: u64) -> String {
    format!("{}.{:02}ms", value_us / 1_000, (value_us % 1_000) / 10)
}

fn format_duration(duration: Duration) -> String {
    format!("{}.{:03}s", duration.as_secs(), duration.subsec_millis())
}
