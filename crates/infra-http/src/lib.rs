// Migrator Infrastructure - HTTP Adapter
// Implements: RequestHandler (one or more HTTP requests per identifier)

pub mod client;
pub mod handler;
pub mod step;
pub mod types;

pub use client::build_client;
pub use handler::StepSequenceHandler;
pub use step::HttpStep;
pub use types::{CertificationRequest, CertifyShopperRequest, MetroUpdateRequest, StepBody};
pub use reqwest::Url;
