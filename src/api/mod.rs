//! HTTP API module for item, health, info and metrics endpoints.

pub mod handlers;
pub mod payload;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
