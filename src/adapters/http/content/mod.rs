//! Content generation HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use handlers::ContentAppState;
pub use routes::{content_router, content_routes};
