// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Layer for the Recipe Catalog
//!
//! # Architecture
//!
//! ```text
//! Client Request
//!     ↓
//! Service Layer (this module)
//!     ↓
//! Command Handler → PendingAppend
//!     ↓
//! Log Store (append to Recipe-{name})
//!     ↓
//! Continuous Projections (run by the Log Store)
//!     ↓
//! Query side (this module again)
//! ```
//!
//! The service is stateless apart from the injected [`LogStore`](crate::log_store::LogStore)
//! handle; calls may run concurrently without coordination.
//!
//! # Example
//!
//! ```rust,no_run
//! use recipe_catalog::config::LogStoreConfig;
//! use recipe_catalog::log_store::HttpLogStore;
//! use recipe_catalog::service::{EventSourcedRecipeService, RecipeService};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = HttpLogStore::new(LogStoreConfig::from_env()?)?;
//!     let service = EventSourcedRecipeService::new(store);
//!
//!     service.add_recipe(json!({"recipe": {"name": "Pancakes", "overallTime": 15}})).await?;
//!     let names = service.list_recipe_names().await?;
//!     println!("{:?}", names);
//!
//!     Ok(())
//! }
//! ```

pub mod recipe;

pub use recipe::{
    Ack, EventSourcedRecipeService, RecipeService, ServiceError, ServiceResult, DUPLICATE_NAME,
};
