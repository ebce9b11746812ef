// Dispatcher - producer/worker fan-out over a closable work queue

pub mod constants;
mod distributor;
mod worker;

use constants::*;
pub use distributor::{work_channel, SendError, WorkReceiver, WorkSender};
pub use worker::Worker;

use crate::domain::{Identifier, WorkItem, WorkerId};
use crate::error::{AppError, Result};
use crate::port::RequestHandler;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info};

/// Fixed-size pool of workers fed by a single producer
pub struct WorkerPool {
    size: usize,
    handler: Arc<dyn RequestHandler>,
}

impl WorkerPool {
    /// Create a pool with `size` workers (at least one)
    pub fn new(size: usize, handler: Arc<dyn RequestHandler>) -> Result<Self> {
        if size < MIN_WORKERS {
            return Err(AppError::Config(format!(
                "worker count must be at least {}, got {}",
                MIN_WORKERS, size
            )));
        }
        Ok(Self { size, handler })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Feed every identifier from `source` to the pool and wait for all
    /// workers to finish.
    ///
    /// The source is drained on a blocking thread, since record sources
    /// usually do synchronous file I/O. The distributor is closed once the
    /// source is exhausted, and this returns only after every worker has
    /// exited. Returns the number of identifiers dispatched.
    pub async fn run<I>(&self, source: I) -> Result<usize>
    where
        I: IntoIterator<Item = Identifier>,
        I::IntoIter: Send + 'static,
    {
        let (sender, receiver) = work_channel(DISTRIBUTOR_CAPACITY);

        let mut workers = JoinSet::new();
        for ordinal in 1..=self.size {
            let worker = Worker::new(
                WorkerId::new(ordinal),
                receiver.clone(),
                Arc::clone(&self.handler),
            );
            workers.spawn(worker.run());
        }
        drop(receiver);

        let source = source.into_iter();
        let producer = tokio::task::spawn_blocking(move || produce(source, sender)).await;

        // Barrier: always wait for in-flight work, even if the producer died
        let mut handled = 0;
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(count) => handled += count,
                Err(e) if e.is_panic() => error!(error = ?e, "Worker panicked"),
                Err(e) => error!(error = ?e, "Worker cancelled"),
            }
        }

        let dispatched =
            producer.map_err(|e| AppError::Worker(format!("Producer task failed: {}", e)))?;
        info!(
            dispatched,
            handled,
            workers = self.size,
            "All workers finished"
        );
        Ok(dispatched)
    }
}

/// Push every identifier into the distributor, then close it
fn produce<I>(source: I, sender: WorkSender) -> usize
where
    I: Iterator<Item = Identifier>,
{
    let mut dispatched = 0;
    for identifier in source {
        if let Err(SendError(item)) = sender.send_blocking(WorkItem::new(identifier)) {
            error!(
                identifier = %item.identifier,
                "No workers left to receive, stopping producer"
            );
            break;
        }
        dispatched += 1;
    }
    sender.close();
    dispatched
}
