// Copyright (c) 2025 - Cowboy AI, Inc.
//! Log Store Abstraction
//!
//! The Log Store is the external append-only event log. It owns durable
//! per-stream sequences and runs the continuous projections that serve
//! every read in this crate.
//!
//! # Architecture
//!
//! ```text
//! Command → Handler → EventEnvelope → LogStore::append → Recipe-{name}
//!                                                             ↓
//!                                                  $by_category index
//!                                                             ↓
//! Query ← Handler ← LogStore::read_projection ← continuous projections
//! ```
//!
//! Every operation is a single request/response; nothing is cached or
//! retried here. Implementations:
//!
//! - [`HttpLogStore`] - EventStore-compatible HTTP API (reqwest)
//! - [`InMemoryLogStore`] - in-process store running the Rust folds
//!
//! # Example
//!
//! ```rust,no_run
//! use recipe_catalog::config::LogStoreConfig;
//! use recipe_catalog::log_store::{HttpLogStore, LogStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = HttpLogStore::new(LogStoreConfig::default())?;
//!     let names = store.read_projection("all-recipe-names").await?;
//!     println!("{}", names);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::errors::LogResult;
use crate::events::EventEnvelope;
use crate::streams::StreamName;

pub mod http;
pub mod memory;

pub use http::HttpLogStore;
pub use memory::{InMemoryLogStore, StoredEvent};

/// Precondition on the target stream for an append
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpectedVersion {
    /// No precondition
    #[default]
    Any,
    /// The stream must not contain any event yet
    NoStream,
}

impl ExpectedVersion {
    /// Value of the `ES-ExpectedVersion` header, if one is sent
    pub fn header_value(&self) -> Option<&'static str> {
        match self {
            ExpectedVersion::Any => None,
            ExpectedVersion::NoStream => Some("-1"),
        }
    }
}

/// Client interface to the Log Store
///
/// `NotFound` from a projection read means the projection has produced no
/// state yet; whether that is an empty result or a failure is the caller's
/// decision.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Append one event to a stream as a single-element batch
    ///
    /// # Errors
    ///
    /// - `TransportFailure` if the store cannot be reached
    /// - `StoreRejected` for any non-2xx answer
    /// - `WrongExpectedVersion` if `expected` does not hold
    async fn append(
        &self,
        stream: &StreamName,
        event: &EventEnvelope,
        expected: ExpectedVersion,
    ) -> LogResult<()>;

    /// Read the current state of a category-wide projection
    async fn read_projection(&self, name: &str) -> LogResult<Value>;

    /// Read the state of one partition (source stream) of a per-stream projection
    async fn read_partitioned_projection(&self, name: &str, partition: &str)
        -> LogResult<Value>;

    /// Names of all registered projections, whatever their status
    async fn list_projections(&self) -> LogResult<BTreeSet<String>>;

    /// Register a continuous, enabled, non-emitting projection
    async fn create_projection(&self, name: &str, source: &str) -> LogResult<()>;

    /// Enable the built-in `$by_category` index
    async fn enable_system_category_index(&self) -> LogResult<()>;
}

#[async_trait]
impl<T: LogStore + ?Sized> LogStore for Arc<T> {
    async fn append(
        &self,
        stream: &StreamName,
        event: &EventEnvelope,
        expected: ExpectedVersion,
    ) -> LogResult<()> {
        (**self).append(stream, event, expected).await
    }

    async fn read_projection(&self, name: &str) -> LogResult<Value> {
        (**self).read_projection(name).await
    }

    async fn read_partitioned_projection(
        &self,
        name: &str,
        partition: &str,
    ) -> LogResult<Value> {
        (**self).read_partitioned_projection(name, partition).await
    }

    async fn list_projections(&self) -> LogResult<BTreeSet<String>> {
        (**self).list_projections().await
    }

    async fn create_projection(&self, name: &str, source: &str) -> LogResult<()> {
        (**self).create_projection(name, source).await
    }

    async fn enable_system_category_index(&self) -> LogResult<()> {
        (**self).enable_system_category_index().await
    }
}
