// HTTP client construction. One client per run, shared by every worker.

use migrator_core::port::HandlerError;
use reqwest::Client;
use std::time::Duration;

/// Build the client passed into the handler.
///
/// `timeout` bounds each request end to end. `None` keeps reqwest's default
/// of no timeout.
pub fn build_client(timeout: Option<Duration>) -> Result<Client, HandlerError> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| HandlerError::Client(format!("Failed to create HTTP client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[test]
    fn test_build_with_and_without_timeout() {
        assert_ok!(build_client(None));
        assert_ok!(build_client(Some(Duration::from_secs(5))));
    }
}
