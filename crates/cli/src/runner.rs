// Runner - wires the CSV source, HTTP handler and worker pool together

use crate::config::RunConfig;
use anyhow::Result;
use migrator_core::application::WorkerPool;
use migrator_infra_csv::CsvRecordSource;
use migrator_infra_http::{build_client, StepSequenceHandler};
use std::sync::Arc;
use tracing::info;

/// Execute one migration run.
///
/// Setup failures (unreadable input, missing header, bad client config) are
/// returned before any request is sent. Per-identifier failures are only
/// logged. Returns the number of identifiers dispatched.
pub async fn run(config: RunConfig) -> Result<usize> {
    let steps: Vec<&str> = config.steps.iter().map(|s| s.label()).collect();
    info!(
        input = %config.input.display(),
        workers = config.workers,
        base_url = %config.base_url,
        steps = ?steps,
        "Starting migration run"
    );

    let source = CsvRecordSource::open(&config.input)?
        .with_quote_stripping(config.strip_escaped_quotes);

    let client = build_client(config.timeout)?;
    let handler = Arc::new(StepSequenceHandler::new(
        client,
        config.base_url,
        config.steps,
    ));
    let pool = WorkerPool::new(config.workers, handler)?;

    let dispatched = pool.run(source).await?;
    info!(dispatched, "Migration run complete");
    Ok(dispatched)
}
