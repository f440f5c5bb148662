//! Middleware for request correlation and panic recovery.

mod panic;
mod request_id;

pub use panic::handle_panic;
pub use request_id::request_context_middleware;
