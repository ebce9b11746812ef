// Migrator Infrastructure - CSV Adapter
// Implements: Record Source (header-skipping identifier iterator)

pub mod error;
pub mod record_source;

pub use error::CsvSourceError;
pub use record_source::CsvRecordSource;
