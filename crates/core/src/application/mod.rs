// Application Layer - Dispatch of identifiers to the worker pool

pub mod dispatcher;

// Re-exports
pub use dispatcher::{work_channel, Worker, WorkerPool, WorkReceiver, WorkSender};
