//! Event-sourced recipe catalog
//!
//! The command/query coordination layer over an EventStore-compatible
//! Log Store. Every recipe is a stream `Recipe-{name}`; all reads are served
//! by continuous projections that the Log Store maintains.
//!
//! - [`log_store`] - `LogStore` trait, HTTP client and in-memory store
//! - [`projection`] - projection definitions and the bootstrapper
//! - [`aggregate`] - pure command handlers
//! - [`service`] - command and query orchestration

pub mod aggregate;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod log_store;
pub mod projection;
pub mod service;
pub mod streams;

// Re-export commonly used types
pub use config::{ConfigError, LogStoreConfig};
pub use errors::{LogError, LogResult};
pub use log_store::{ExpectedVersion, HttpLogStore, InMemoryLogStore, LogStore};
pub use projection::{bootstrap, required_projections, spawn_bootstrap, BootstrapReport};
pub use service::{Ack, EventSourcedRecipeService, RecipeService, ServiceError, ServiceResult};
