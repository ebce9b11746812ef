// CSV Record Source
// Yields the first column of every data row as an Identifier

use crate::error::CsvSourceError;
use migrator_core::domain::Identifier;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, error, warn};

/// Escaped quote sequence some exports leave around identifiers
const ESCAPED_QUOTE: &str = "\\\"";

/// Lazy, finite, non-restartable sequence of identifiers read from a
/// comma-separated file.
///
/// The header row is consumed on construction and fixes the expected column
/// count. Rows with a different count, or that are not valid UTF-8, are
/// logged and skipped. An I/O error ends the sequence.
pub struct CsvRecordSource<R: Read = File> {
    reader: csv::Reader<R>,
    record: csv::StringRecord,
    strip_escaped_quotes: bool,
    finished: bool,
}

impl CsvRecordSource<File> {
    /// Open `path` and read its header row
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CsvSourceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CsvSourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Opened CSV input");
        Self::from_reader(file)
    }
}

impl<R: Read> CsvRecordSource<R> {
    /// Wrap any reader and consume its header row
    pub fn from_reader(input: R) -> Result<Self, CsvSourceError> {
        // Header is read by hand so an empty input is an error, not an empty header
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(false)
            .from_reader(input);

        let mut header = csv::StringRecord::new();
        if !reader
            .read_record(&mut header)
            .map_err(CsvSourceError::Header)?
        {
            return Err(CsvSourceError::MissingHeader);
        }
        debug!(columns = header.len(), "Read CSV header");

        Ok(Self {
            reader,
            record: csv::StringRecord::new(),
            strip_escaped_quotes: false,
            finished: false,
        })
    }

    /// Remove `\"` sequences from every identifier
    pub fn with_quote_stripping(mut self, enabled: bool) -> Self {
        self.strip_escaped_quotes = enabled;
        self
    }

    fn identifier_from_record(&self) -> Identifier {
        let raw = self.record.get(0).unwrap_or_default();
        if self.strip_escaped_quotes {
            Identifier::new(raw.replace(ESCAPED_QUOTE, ""))
        } else {
            Identifier::new(raw)
        }
    }
}

impl<R: Read> Iterator for CsvRecordSource<R> {
    type Item = Identifier;

    fn next(&mut self) -> Option<Identifier> {
        if self.finished {
            return None;
        }
        loop {
            match self.reader.read_record(&mut self.record) {
                Ok(true) => return Some(self.identifier_from_record()),
                Ok(false) => {
                    self.finished = true;
                    return None;
                }
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                    error!(error = %e, "Error reading CSV, stopping input");
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    warn!(error = %e, "Error reading CSV, skipping row");
                }
            }
        }
    }
}
