// Domain Layer - Values that travel through the dispatcher

pub mod identifier;

// Re-exports
pub use identifier::{Identifier, WorkItem, WorkerId};
