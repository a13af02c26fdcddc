mod jobs;
mod worker;

use std::sync::Arc;

use reqwest::Url;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::{http::HttpClient, metrics::RequestResult, shutdown::ShutdownSender};

pub use jobs::{Ticket, spawn_job_source};
use worker::{WorkerContext, run_worker};

/// Fixed set of workers sharing one ticket queue, one result sink, one client,
/// and one shutdown signal. Workers are never restarted.
#[derive(Debug)]
pub struct WorkerPool {
    handles: Vec<JoinHandle<u64>>,
}

impl WorkerPool {
    /// Starts `size` workers. Each worker subscribes to shutdown before it is
    /// spawned, so a signal sent any time after this returns reaches all of
    /// them. The pool's clones of `results_tx` are the only senders left once
    /// the caller drops its own.
    #[must_use]
    pub fn spawn(
        size: usize,
        client: &Arc<dyn HttpClient>,
        url: &Url,
        tickets: &flume::Receiver<Ticket>,
        results_tx: &mpsc::Sender<RequestResult>,
        shutdown_tx: &ShutdownSender,
    ) -> Self {
        let url = Arc::new(url.clone());
        let mut handles = Vec::with_capacity(size);

        for id in 0..size {
            let context = WorkerContext {
                id,
                client: Arc::clone(client),
                url: Arc::clone(&url),
                tickets: tickets.clone(),
                results_tx: results_tx.clone(),
            };
            let shutdown_rx = shutdown_tx.subscribe();
            handles.push(tokio::spawn(run_worker(context, shutdown_rx)));
        }

        debug!("Spawned {} workers.", size);
        Self { handles }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Waits for every worker to return and yields the number of results they
    /// delivered. A worker that panicked is logged and skipped.
    pub async fn join(self) -> u64 {
        let mut delivered: u64 = 0;
        for handle in self.handles {
            match handle.await {
                Ok(handled) => delivered = delivered.saturating_add(handled),
                Err(err) => warn!("Worker task failed: {}", err),
            }
        }
        delivered
    }
}
