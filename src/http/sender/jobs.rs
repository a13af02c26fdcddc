use tokio::task::JoinHandle;
use tracing::debug;

/// One request to send. Claimed by exactly one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Ticket {
    #[must_use]
    pub const fn index(self) -> u64 {
        self.0
    }
}

/// Spawns the producer of `total` tickets, emitted in index order.
///
/// The queue holds every ticket, so the producer never waits on slow workers.
/// Dropping the sender after the last ticket closes the queue, which tells
/// idle workers there is no more work. The handle resolves to the number of
/// tickets actually queued.
#[must_use]
pub fn spawn_job_source(total: u64) -> (flume::Receiver<Ticket>, JoinHandle<u64>) {
    let capacity = usize::try_from(total).unwrap_or(usize::MAX);
    let (tickets_tx, tickets_rx) = flume::bounded::<Ticket>(capacity);

    let handle = tokio::spawn(async move {
        let mut queued: u64 = 0;
        for index in 0..total {
            if tickets_tx.send_async(Ticket(index)).await.is_err() {
                debug!("Ticket queue closed after {} tickets.", queued);
                break;
            }
            queued = queued.saturating_add(1);
        }
        queued
    });

    (tickets_rx, handle)
}
