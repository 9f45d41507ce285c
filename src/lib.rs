//! Minimal in-memory item service.
//!
//! Exposes CRUD operations over a single ordered collection of items, plus
//! health and info endpoints. State lives for the lifetime of the process.
//!
//! # Endpoints
//!
//! ```text
//! GET    /health          liveness, uptime, environment, version
//! GET    /api/info        application and host metadata
//! GET    /api/items       all items, in insertion order
//! GET    /api/items/:id   one item, or 404
//! POST   /api/items       create (name required), 201
//! PUT    /api/items/:id   partial update, refreshes updatedAt
//! DELETE /api/items/:id   remove and return the item
//! GET    /metrics         Prometheus text, when a recorder is installed
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`store`]: Item records and the in-memory store
//! - [`api`]: HTTP router and handlers
//! - [`metrics`]: Metric names and recorders
//! - [`utils`]: Shutdown signal and host helpers

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, Result, ServiceError, StoreError};
pub use store::ItemStore;
