// Port Layer - Interfaces for external dependencies

pub mod request_handler;

// Re-exports
pub use request_handler::{HandlerError, RequestHandler};
