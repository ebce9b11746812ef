// Work Distributor - bounded hand-off queue between producer and workers

use crate::domain::WorkItem;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

/// Returned when every receiver is gone; hands the unsent item back
#[derive(Error, Debug)]
#[error("distributor has no receivers left")]
pub struct SendError(pub WorkItem);

/// Producer side of the distributor
///
/// There is exactly one sender. `close` consumes it, so a send after close
/// cannot be expressed.
pub struct WorkSender {
    tx: mpsc::Sender<WorkItem>,
}

impl WorkSender {
    /// Send from a blocking thread, waiting for queue room
    pub fn send_blocking(&self, item: WorkItem) -> Result<(), SendError> {
        self.tx.blocking_send(item).map_err(|e| SendError(e.0))
    }

    /// Send from async code, waiting for queue room
    pub async fn send(&self, item: WorkItem) -> Result<(), SendError> {
        self.tx.send(item).await.map_err(|e| SendError(e.0))
    }

    /// Signal end-of-stream. Items already queued are still delivered.
    pub fn close(self) {
        debug!("Closing work distributor");
        drop(self.tx);
    }
}

/// Consumer side of the distributor, shared by all workers
#[derive(Clone)]
pub struct WorkReceiver {
    rx: Arc<Mutex<mpsc::Receiver<WorkItem>>>,
}

impl WorkReceiver {
    /// Wait for the next item. `None` once the sender is closed and the
    /// queue is drained.
    pub async fn recv(&self) -> Option<WorkItem> {
        self.rx.lock().await.recv().await
    }
}

/// Create a distributor with the given queue capacity (minimum 1)
pub fn work_channel(capacity: usize) -> (WorkSender, WorkReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        WorkSender { tx },
        WorkReceiver {
            rx: Arc::new(Mutex::new(rx)),
        },
    )
}
