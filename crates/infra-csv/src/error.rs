// Record source setup errors. Any of these aborts the run before dispatch.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvSourceError {
    #[error("Failed to open CSV file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read CSV header: input is empty")]
    MissingHeader,

    #[error("Failed to read CSV header: {0}")]
    Header(#[source] csv::Error),
}
