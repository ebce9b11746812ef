//! Migrator CLI - shared setup for the migration binaries
//!
//! Both programs read identifiers from a CSV file and fan them out to a
//! fixed pool of workers that issue HTTP requests:
//!
//! - `switch-metros`: `PATCH /v2/shoppers/{id}` with a new `metro_id`
//! - `assign-vehicles`: `POST /v2/vehicles/{vehicle}/assign/{id}`

pub mod config;
pub mod logging;
pub mod runner;

pub use config::{AssignVehiclesArgs, RunConfig, SwitchMetrosArgs};
