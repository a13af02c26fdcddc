use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::{
    config::RunConfig,
    error::AppResult,
    http::{HttpClient, WorkerPool, spawn_job_source},
    metrics::{Progress, Report, RequestResult, ResultCollector},
    shutdown::{ShutdownSender, trigger_shutdown},
};

/// Largest result buffer tokio's bounded channel accepts.
const MAX_SINK_CAPACITY: usize = usize::MAX >> 4;

/// Runs one load test to completion and returns its report.
///
/// Exactly `config.requests()` results are collected unless `shutdown_tx`
/// fires first (or every worker disappears), in which case the report covers
/// whatever finished and is marked incomplete. Shutdown is fired once all
/// results are in, then every worker is joined before the result sink is
/// dropped.
///
/// # Errors
///
/// Returns an error when the latency histogram cannot be allocated or the
/// ticket producer task fails.
pub async fn run_load_test<F>(
    config: &RunConfig,
    client: Arc<dyn HttpClient>,
    shutdown_tx: &ShutdownSender,
    mut on_progress: F,
) -> AppResult<Report>
where
    F: FnMut(Progress) + Send,
{
    let requests = config.requests();
    let concurrency = config.concurrency();
    info!(
        "Starting load test: {} requests to {} with {} workers.",
        requests,
        config.url(),
        concurrency
    );

    let mut collector = ResultCollector::new(requests)?;
    let mut shutdown_rx = shutdown_tx.subscribe();
    let sink_capacity = usize::try_from(requests)
        .unwrap_or(usize::MAX)
        .min(MAX_SINK_CAPACITY);
    let (results_tx, mut results_rx) = mpsc::channel::<RequestResult>(sink_capacity);

    let run_start = Instant::now();
    let (tickets, source) = spawn_job_source(requests);
    let pool = WorkerPool::spawn(
        concurrency,
        &client,
        config.url(),
        &tickets,
        &results_tx,
        shutdown_tx,
    );
    drop(results_tx);
    drop(tickets);

    while collector.completed() < collector.expected() {
        tokio::select! {
            biased;
            result = results_rx.recv() => match result {
                Some(result) => {
                    if let Some(progress) = collector.record(&result) {
                        on_progress(progress);
                    }
                }
                None => {
                    warn!(
                        "All workers exited after {}/{} results.",
                        collector.completed(),
                        collector.expected()
                    );
                    break;
                }
            },
            _ = shutdown_rx.recv() => {
                warn!(
                    "Shutdown requested after {}/{} results.",
                    collector.completed(),
                    collector.expected()
                );
                break;
            }
        }
    }
    let total_time = run_start.elapsed();

    trigger_shutdown(shutdown_tx);
    let delivered = pool.join().await;
    while let Ok(result) = results_rx.try_recv() {
        collector.record(&result);
    }
    drop(results_rx);

    let queued = source.await?;
    debug!(
        "Queued {} tickets, workers delivered {} results.",
        queued, delivered
    );

    let report = collector.finish(total_time);
    info!(
        "Load test finished: {}/{} requests in {:?}.",
        report.total_requests, report.expected_requests, report.total_time
    );
    Ok(report)
}
