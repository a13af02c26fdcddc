//! Run-wide cancellation signal shared by every worker.
use tokio::sync::broadcast;

pub type ShutdownSender = broadcast::Sender<()>;
pub type ShutdownReceiver = broadcast::Receiver<()>;

/// Broadcast channel size for shutdown notifications (single signal fan-out).
const SHUTDOWN_CHANNEL_CAPACITY: usize = 1;

#[must_use]
pub fn shutdown_channel() -> (ShutdownSender, ShutdownReceiver) {
    broadcast::channel::<()>(SHUTDOWN_CHANNEL_CAPACITY)
}

/// Fires the shutdown signal. Repeated calls, or calls after every receiver
/// is gone, are no-ops.
pub fn trigger_shutdown(shutdown_tx: &ShutdownSender) {
    drop(shutdown_tx.send(()));
}
