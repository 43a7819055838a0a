// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-Memory Log Store
//!
//! An in-process [`LogStore`] that behaves like the EventStore surface the
//! catalog depends on:
//!
//! - one global, append-only log; per-stream order is append order
//! - `ExpectedVersion::NoStream` is enforced
//! - category projections answer `NotFound` until they are registered, the
//!   `$by_category` index is enabled and the category holds an event
//! - partitioned reads answer `NotFound` for streams with no events
//!
//! Projection state is computed on read by replaying the Rust folds of
//! [`RecipeProjection`]. Projections registered under any other name have no
//! runnable definition here and never produce state.
//!
//! For tests it can also freeze projection progress ([`pause_projections`])
//! to open the eventual-consistency window, reject specific projection
//! definitions or appends, and count calls.
//!
//! [`pause_projections`]: InMemoryLogStore::pause_projections

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::{ExpectedVersion, LogStore};
use crate::errors::{LogError, LogResult};
use crate::events::EventEnvelope;
use crate::projection::{Partitioning, RecipeProjection};
use crate::streams::{category_of, StreamName, RECIPE_CATEGORY};

/// Name of the built-in category index projection
pub const BY_CATEGORY: &str = "$by_category";

/// An event as recorded by the store
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEvent {
    pub stream: String,
    /// Position in the global log, starting at 0
    pub position: u64,
    /// Position within the stream, starting at 0
    pub stream_version: u64,
    pub recorded_at: DateTime<Utc>,
    pub event: EventEnvelope,
}

#[derive(Debug, Default)]
struct Inner {
    log: Vec<StoredEvent>,
    projections: BTreeMap<String, String>,
    category_index_enabled: bool,
    /// Number of log entries visible to projections while paused
    projection_checkpoint: Option<usize>,
    rejected_projections: HashMap<String, u16>,
    category_index_rejection: Option<u16>,
    append_rejection: Option<u16>,
    create_calls: usize,
    append_calls: usize,
}

impl Inner {
    fn visible(&self) -> &[StoredEvent] {
        let end = self
            .projection_checkpoint
            .map_or(self.log.len(), |cutoff| cutoff.min(self.log.len()));
        &self.log[..end]
    }

    fn stream_len(&self, stream: &str) -> usize {
        self.log.iter().filter(|stored| stored.stream == stream).count()
    }

    /// Projection that may produce state, given its expected partitioning
    fn runnable(&self, name: &str, partitioning: Partitioning) -> LogResult<RecipeProjection> {
        if !self.projections.contains_key(name) || !self.category_index_enabled {
            return Err(LogError::NotFound);
        }
        RecipeProjection::from_name(name)
            .filter(|projection| projection.partitioning() == partitioning)
            .ok_or(LogError::NotFound)
    }
}

/// In-process Log Store running the recipe projections as Rust folds
#[derive(Debug, Clone, Default)]
pub struct InMemoryLogStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop projections at the current end of the log
    ///
    /// Appends keep succeeding but reads reflect only events recorded before
    /// this call, until [`resume_projections`](Self::resume_projections).
    pub async fn pause_projections(&self) {
        let mut inner = self.inner.write().await;
        inner.projection_checkpoint = Some(inner.log.len());
    }

    /// Let projections catch up with the whole log
    pub async fn resume_projections(&self) {
        self.inner.write().await.projection_checkpoint = None;
    }

    /// Make `create_projection(name, ..)` fail with the given status
    pub async fn reject_projection(&self, name: impl Into<String>, status: u16) {
        self.inner
            .write()
            .await
            .rejected_projections
            .insert(name.into(), status);
    }

    /// Make enabling the category index fail with the given status
    pub async fn reject_category_index(&self, status: u16) {
        self.inner.write().await.category_index_rejection = Some(status);
    }

    /// Make every append fail with the given status, or accept again with `None`
    pub async fn reject_appends(&self, status: Option<u16>) {
        self.inner.write().await.append_rejection = status;
    }

    pub async fn category_index_enabled(&self) -> bool {
        self.inner.read().await.category_index_enabled
    }

    /// Number of `create_projection` calls received, successful or not
    pub async fn create_calls(&self) -> usize {
        self.inner.read().await.create_calls
    }

    /// Number of `append` calls received, successful or not
    pub async fn append_calls(&self) -> usize {
        self.inner.read().await.append_calls
    }

    /// Events of one stream in append order
    pub async fn stream_events(&self, stream: &str) -> Vec<StoredEvent> {
        self.inner
            .read()
            .await
            .log
            .iter()
            .filter(|stored| stored.stream == stream)
            .cloned()
            .collect()
    }

    /// Every recorded event in global order
    pub async fn all_events(&self) -> Vec<StoredEvent> {
        self.inner.read().await.log.clone()
    }
}

#[async_trait]
impl LogStore for InMemoryLogStore {
    async fn append(
        &self,
        stream: &StreamName,
        event: &EventEnvelope,
        expected: ExpectedVersion,
    ) -> LogResult<()> {
        let mut inner = self.inner.write().await;
        inner.append_calls += 1;

        if let Some(status) = inner.append_rejection {
            return Err(LogError::StoreRejected {
                status,
                message: "Append rejected".to_string(),
            });
        }

        let stream_version = inner.stream_len(stream.as_str());
        if expected == ExpectedVersion::NoStream && stream_version > 0 {
            return Err(LogError::WrongExpectedVersion {
                stream: stream.to_string(),
            });
        }

        let position = inner.log.len() as u64;
        inner.log.push(StoredEvent {
            stream: stream.to_string(),
            position,
            stream_version: stream_version as u64,
            recorded_at: Utc::now(),
            event: event.clone(),
        });

        debug!(
            stream = %stream,
            position,
            event_type = %event.event_type,
            "Recorded event"
        );
        Ok(())
    }

    async fn read_projection(&self, name: &str) -> LogResult<Value> {
        let inner = self.inner.read().await;
        let projection = inner.runnable(name, Partitioning::Category)?;

        let events: Vec<&EventEnvelope> = inner
            .visible()
            .iter()
            .filter(|stored| category_of(&stored.stream) == Some(RECIPE_CATEGORY))
            .map(|stored| &stored.event)
            .collect();

        if events.is_empty() {
            return Err(LogError::NotFound);
        }
        Ok(projection.replay(events))
    }

    async fn read_partitioned_projection(
        &self,
        name: &str,
        partition: &str,
    ) -> LogResult<Value> {
        let inner = self.inner.read().await;
        let projection = inner.runnable(name, Partitioning::PerStream)?;

        if category_of(partition) != Some(RECIPE_CATEGORY) {
            return Err(LogError::NotFound);
        }

        let events: Vec<&EventEnvelope> = inner
            .visible()
            .iter()
            .filter(|stored| stored.stream == partition)
            .map(|stored| &stored.event)
            .collect();

        if events.is_empty() {
            return Err(LogError::NotFound);
        }
        Ok(projection.replay(events))
    }

    async fn list_projections(&self) -> LogResult<BTreeSet<String>> {
        let inner = self.inner.read().await;
        let mut names: BTreeSet<String> = inner.projections.keys().cloned().collect();
        names.insert(BY_CATEGORY.to_string());
        Ok(names)
    }

    async fn create_projection(&self, name: &str, source: &str) -> LogResult<()> {
        let mut inner = self.inner.write().await;
        inner.create_calls += 1;

        if let Some(status) = inner.rejected_projections.get(name).copied() {
            return Err(LogError::StoreRejected {
                status,
                message: format!("Projection definition rejected: {}", name),
            });
        }

        if name == BY_CATEGORY || inner.projections.contains_key(name) {
            return Err(LogError::StoreRejected {
                status: 409,
                message: format!("Projection already exists: {}", name),
            });
        }

        inner.projections.insert(name.to_string(), source.to_string());
        Ok(())
    }

    async fn enable_system_category_index(&self) -> LogResult<()> {
        let mut inner = self.inner.write().await;

        if let Some(status) = inner.category_index_rejection {
            return Err(LogError::StoreRejected {
                status,
                message: "Failed to enable $by_category".to_string(),
            });
        }

        inner.category_index_enabled = true;
        Ok(())
    }
}
