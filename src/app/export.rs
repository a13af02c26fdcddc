use std::path::Path;

use serde_json::{Map, Value, json};
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::args::OutputFormat;
use crate::error::AppResult;
use crate::metrics::Report;

use super::summary::{format_x100, render_text};

#[must_use]
pub fn report_json(report: &Report) -> Value {
    let status_codes: Map<String, Value> = report
        .status_codes
        .iter()
        .map(|(code, count)| (code.to_string(), json!(count)))
        .collect();

    json!({
        "started_at": report.started_at.to_rfc3339(),
        "total_time_ms": u64::try_from(report.total_time.as_millis()).unwrap_or(u64::MAX),
        "expected_requests": report.expected_requests,
        "total_requests": report.total_requests,
        "success_requests": report.success_requests,
        "error_requests": report.error_requests(),
        "timeout_requests": report.timeout_requests,
        "success_rate": format_x100(report.success_rate_x100()),
        "requests_per_sec": format_x100(report.requests_per_sec_x100()),
        "completed": report.completed,
        "latency_us": {
            "min": report.latency.min_us,
            "avg": report.latency.avg_us,
            "max": report.latency.max_us,
            "p50": report.latency.p50_us,
            "p90": report.latency.p90_us,
            "p99": report.latency.p99_us
        },
        "status_codes": status_codes
    })
}

/// Renders the report in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_report(report: &Report, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => {
            let mut rendered = serde_json::to_string_pretty(&report_json(report))?;
            rendered.push('\n');
            Ok(rendered)
        }
    }
}

/// Writes the rendered report to `path`, or to stdout when no path is given.
///
/// # Errors
///
/// Returns an error when the output file cannot be written.
pub async fn write_report(path: Option<&str>, rendered: &str) -> AppResult<()> {
    let Some(path) = path else {
        print!("{}", rendered);
        return Ok(());
    };

    if let Some(parent) = Path::new(path).parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    let file = tokio::fs::File::create(path).await?;
    let mut writer = BufWriter::new(file);
    writer.write_all(rendered.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
