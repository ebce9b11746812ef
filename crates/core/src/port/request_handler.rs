// Request Handler Port
// Abstraction for the outbound request(s) issued per identifier

use crate::domain::{Identifier, WorkerId};
use async_trait::async_trait;
use thiserror::Error;

/// Per-identifier request errors.
///
/// All of these are recoverable: the worker logs them and moves on to the
/// next identifier.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Client error: {0}")]
    Client(String),
}

/// Request Handler trait
///
/// Implementations:
/// - StepSequenceHandler (infra-http): one or more HTTP requests per identifier
/// - RecordingHandler (mocks): records calls for tests
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// Issue the request(s) for one identifier.
    ///
    /// Successful outcomes are logged by the implementation. An `Err` is
    /// logged by the calling worker and never stops the pool.
    async fn handle(&self, worker: WorkerId, identifier: &Identifier) -> Result<(), HandlerError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Mock handler that records every call it receives
    #[derive(Default)]
    pub struct RecordingHandler {
        calls: Mutex<Vec<(WorkerId, Identifier)>>,
        failing: HashSet<Identifier>,
        panicking: HashSet<Identifier>,
        delay: Option<Duration>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl RecordingHandler {
        pub fn new() -> Self {
            Self::default()
        }

        /// Return a transport error for these identifiers (the call is still recorded)
        pub fn failing_on<I, S>(mut self, identifiers: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<Identifier>,
        {
            self.failing.extend(identifiers.into_iter().map(Into::into));
            self
        }

        /// Panic for these identifiers (the call is still recorded)
        pub fn panicking_on<I, S>(mut self, identifiers: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<Identifier>,
        {
            self.panicking.extend(identifiers.into_iter().map(Into::into));
            self
        }

        /// Sleep this long inside every call
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        /// Identifiers in the order the calls started
        pub fn identifiers(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(_, id)| id.as_str().to_string())
                .collect()
        }

        pub fn workers(&self) -> HashSet<WorkerId> {
            self.calls.lock().unwrap().iter().map(|(w, _)| *w).collect()
        }

        /// Highest number of calls that were running at the same time
        pub fn max_in_flight(&self) -> usize {
            self.max_in_flight.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RequestHandler for RecordingHandler {
        async fn handle(
            &self,
            worker: WorkerId,
            identifier: &Identifier,
        ) -> Result<(), HandlerError> {
            self.calls
                .lock()
                .unwrap()
                .push((worker, identifier.clone()));

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.panicking.contains(identifier) {
                panic!("mock handler panic for {}", identifier);
            }
            if self.failing.contains(identifier) {
                return Err(HandlerError::Transport(format!(
                    "connection refused for {}",
                    identifier
                )));
            }
            Ok(())
        }
    }
}
