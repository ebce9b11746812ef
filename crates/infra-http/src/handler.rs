// Step Sequence Handler
// Issues each configured HttpStep in order for every identifier

use crate::step::HttpStep;
use async_trait::async_trait;
use migrator_core::domain::{Identifier, WorkerId};
use migrator_core::port::{HandlerError, RequestHandler};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode, Url};
use tracing::{info, warn};

/// RequestHandler backed by a shared reqwest client.
///
/// Steps run in order. The first failing step ends the sequence for that
/// identifier. Non-2xx responses are logged but are not errors, and the
/// response body is never read.
pub struct StepSequenceHandler {
    client: Client,
    base_url: Url,
    steps: Vec<HttpStep>,
}

impl StepSequenceHandler {
    pub fn new(client: Client, base_url: Url, steps: Vec<HttpStep>) -> Self {
        Self {
            client,
            base_url,
            steps,
        }
    }

    pub fn steps(&self) -> &[HttpStep] {
        &self.steps
    }

    async fn send_step(
        &self,
        step: &HttpStep,
        identifier: &Identifier,
    ) -> Result<StatusCode, HandlerError> {
        let url = step.url_for(&self.base_url, identifier)?;

        let mut request = self.client.request(step.method().clone(), url);
        for (name, value) in step.headers() {
            request = request.header(*name, *value);
        }
        if let Some(body) = step.body() {
            let payload = serde_json::to_vec(body)?;
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(payload);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_builder() {
                HandlerError::InvalidRequest(format!("{} {}: {}", step.method(), step.label(), e))
            } else {
                HandlerError::Transport(format!("{} {}: {}", step.method(), step.label(), e))
            }
        })?;
        Ok(response.status())
    }
}

#[async_trait]
impl RequestHandler for StepSequenceHandler {
    async fn handle(&self, worker: WorkerId, identifier: &Identifier) -> Result<(), HandlerError> {
        for step in &self.steps {
            let status = self.send_step(step, identifier).await?;
            if status.is_success() {
                info!(
                    worker = %worker,
                    identifier = %identifier,
                    step = step.label(),
                    status = %status,
                    "Request completed"
                );
            } else {
                warn!(
                    worker = %worker,
                    identifier = %identifier,
                    step = step.label(),
                    status = %status,
                    "Request returned non-success status"
                );
            }
        }
        Ok(())
    }
}
