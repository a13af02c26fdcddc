use std::sync::Arc;

use reqwest::Url;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::debug;

use crate::{http::HttpClient, metrics::RequestResult, shutdown::ShutdownReceiver};

use super::jobs::Ticket;

pub(super) struct WorkerContext {
    pub(super) id: usize,
    pub(super) client: Arc<dyn HttpClient>,
    pub(super) url: Arc<Url>,
    pub(super) tickets: flume::Receiver<Ticket>,
    pub(super) results_tx: mpsc::Sender<RequestResult>,
}

/// Claims tickets until the queue is exhausted or shutdown fires. Every
/// claimed ticket yields exactly one result unless shutdown interrupts the
/// request in flight.
pub(super) async fn run_worker(context: WorkerContext, mut shutdown_rx: ShutdownReceiver) -> u64 {
    let mut handled: u64 = 0;

    loop {
        let ticket = tokio::select! {
            _ = shutdown_rx.recv() => break,
            ticket = context.tickets.recv_async() => match ticket {
                Ok(ticket) => ticket,
                Err(flume::RecvError::Disconnected) => break,
            },
        };

        let start = Instant::now();
        let outcome = tokio::select! {
            _ = shutdown_rx.recv() => {
                debug!("Worker {} interrupted on ticket {}.", context.id, ticket.index());
                break;
            }
            outcome = context.client.get(&context.url) => outcome,
        };
        let result = RequestResult {
            outcome,
            duration: start.elapsed(),
        };
        if let Some(err) = result.error() {
            debug!("Ticket {} failed: {}", ticket.index(), err);
        }

        if context.results_tx.send(result).await.is_err() {
            break;
        }
        handled = handled.saturating_add(1);
    }

    debug!("Worker {} exiting after {} requests.", context.id, handled);
    handled
}
