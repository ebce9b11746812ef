// Worker - pulls identifiers from the distributor until it closes

use super::distributor::WorkReceiver;
use crate::domain::{WorkItem, WorkerId};
use crate::port::RequestHandler;
use std::sync::Arc;
use tracing::{error, info};

/// A single pool member. Holds no state across identifiers.
pub struct Worker {
    id: WorkerId,
    inbox: WorkReceiver,
    handler: Arc<dyn RequestHandler>,
}

impl Worker {
    pub fn new(id: WorkerId, inbox: WorkReceiver, handler: Arc<dyn RequestHandler>) -> Self {
        Self { id, inbox, handler }
    }

    /// Run until the distributor is closed and drained.
    /// Returns the number of identifiers this worker handled.
    pub async fn run(self) -> usize {
        info!(worker = %self.id, "Worker started");
        let mut handled = 0;
        while let Some(item) = self.inbox.recv().await {
            self.process(&item).await;
            handled += 1;
        }
        info!(worker = %self.id, handled, "Worker stopped");
        handled
    }

    /// Invoke the handler for one item. Errors end here.
    pub async fn process(&self, item: &WorkItem) {
        if let Err(e) = self.handler.handle(self.id, &item.identifier).await {
            error!(
                worker = %self.id,
                identifier = %item.identifier,
                error = %e,
                "Request failed"
            );
        }
    }
}
