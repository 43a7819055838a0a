// Copyright (c) 2025 - Cowboy AI, Inc.
//! Projection Bootstrapper
//!
//! Ensures the required continuous projections exist in the Log Store and
//! that the `$by_category` index they depend on is enabled.
//!
//! # Guarantees
//!
//! - **Idempotent**: a projection that is already registered is skipped,
//!   so a second run against a bootstrapped store creates nothing.
//! - **Independent**: every projection and the category index are handled
//!   concurrently; one failure neither aborts nor delays the others.
//! - **Non-fatal**: failures are logged and reported, never returned.
//!
//! Serving does not wait for bootstrap. Until it completes, category reads
//! come back as "no state yet" and the query side answers with empty lists.

use futures::future::join_all;
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::ProjectionDefinition;
use crate::errors::LogError;
use crate::log_store::LogStore;

/// What happened to one required projection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionOutcome {
    Created,
    AlreadyExists,
    Failed(String),
}

/// Result of a bootstrap run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Per-projection outcome, in the order the projections were given
    pub projections: Vec<(String, ProjectionOutcome)>,

    /// Error from enabling `$by_category`, if it failed
    pub category_index_error: Option<String>,
}

impl BootstrapReport {
    pub fn created(&self) -> Vec<&str> {
        self.names_where(|outcome| *outcome == ProjectionOutcome::Created)
    }

    pub fn skipped(&self) -> Vec<&str> {
        self.names_where(|outcome| *outcome == ProjectionOutcome::AlreadyExists)
    }

    pub fn failed(&self) -> Vec<&str> {
        self.names_where(|outcome| matches!(outcome, ProjectionOutcome::Failed(_)))
    }

    pub fn category_index_enabled(&self) -> bool {
        self.category_index_error.is_none()
    }

    /// Whether every sub-operation succeeded
    pub fn is_complete(&self) -> bool {
        self.failed().is_empty() && self.category_index_enabled()
    }

    fn names_where(&self, predicate: impl Fn(&ProjectionOutcome) -> bool) -> Vec<&str> {
        self.projections
            .iter()
            .filter(|(_, outcome)| predicate(outcome))
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

impl fmt::Display for BootstrapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "created {:?}, skipped {:?}, failed {:?}, category index {}",
            self.created(),
            self.skipped(),
            self.failed(),
            if self.category_index_enabled() {
                "enabled"
            } else {
                "not enabled"
            }
        )
    }
}

/// Ensure every required projection exists and enable the category index
pub async fn bootstrap<S>(store: &S, required: &[ProjectionDefinition]) -> BootstrapReport
where
    S: LogStore + ?Sized,
{
    let ensure_all = join_all(
        required
            .iter()
            .map(|definition| ensure_projection(store, definition)),
    );

    let (outcomes, category_index) = tokio::join!(ensure_all, enable_category_index(store));

    let report = BootstrapReport {
        projections: required
            .iter()
            .map(|definition| definition.name.clone())
            .zip(outcomes)
            .collect(),
        category_index_error: category_index.err().map(|e| e.to_string()),
    };

    if report.is_complete() {
        info!(%report, "Projection bootstrap complete");
    } else {
        warn!(%report, "Projection bootstrap finished with failures");
    }
    report
}

/// Run [`bootstrap`] as a detached task
///
/// Returns immediately; callers that do not care about the outcome can drop
/// the handle.
pub fn spawn_bootstrap<S>(
    store: Arc<S>,
    required: Vec<ProjectionDefinition>,
) -> JoinHandle<BootstrapReport>
where
    S: LogStore + ?Sized + 'static,
{
    tokio::spawn(async move { bootstrap(&*store, &required).await })
}

async fn ensure_projection<S>(store: &S, definition: &ProjectionDefinition) -> ProjectionOutcome
where
    S: LogStore + ?Sized,
{
    let existing = match store.list_projections().await {
        Ok(existing) => existing,
        Err(e) => return failed(&definition.name, "list projections", e),
    };

    if existing.contains(&definition.name) {
        info!(projection = %definition.name, "Projection already exists");
        return ProjectionOutcome::AlreadyExists;
    }

    match store
        .create_projection(&definition.name, &definition.source)
        .await
    {
        Ok(()) => {
            info!(projection = %definition.name, "Projection created");
            ProjectionOutcome::Created
        }
        Err(e) => failed(&definition.name, "create projection", e),
    }
}

async fn enable_category_index<S>(store: &S) -> Result<(), LogError>
where
    S: LogStore + ?Sized,
{
    store.enable_system_category_index().await.map_err(|e| {
        warn!(error = %e, "Failed to enable $by_category");
        e
    })
}

fn failed(name: &str, step: &str, error: LogError) -> ProjectionOutcome {
    warn!(projection = name, step, error = %error, "Projection bootstrap step failed");
    ProjectionOutcome::Failed(error.to_string())
}
