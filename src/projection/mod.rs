// Copyright (c) 2025 - Cowboy AI, Inc.

//! Continuous Projections
//!
//! Read models in this system are continuous projections maintained by the
//! Log Store. This crate never computes them on the serving path; it only
//! registers their definitions and reads their state.
//!
//! # Lifecycle
//!
//! ```text
//! startup ──> bootstrap() ──> list existing ──> create missing
//!                  │
//!                  └────────> enable $by_category
//!
//! (projections then run for the lifetime of the Log Store)
//! ```
//!
//! # Modules
//!
//! - [`pure`] - generic pure fold helpers
//! - [`recipe`] - the three recipe projections, as JS source and Rust folds
//! - [`bootstrap`] - idempotent, failure-tolerant registration

pub mod bootstrap;
pub mod pure;
pub mod recipe;

pub use bootstrap::{bootstrap, spawn_bootstrap, BootstrapReport, ProjectionOutcome};
pub use recipe::{
    Partitioning, RecipeNames, RecipeProjection, RecipeState, RecipeSummaries, RecipeSummary,
};

/// A projection to register: its name and source definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionDefinition {
    pub name: String,
    pub source: String,
}

impl ProjectionDefinition {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

impl From<RecipeProjection> for ProjectionDefinition {
    fn from(projection: RecipeProjection) -> Self {
        Self::new(projection.name(), projection.source())
    }
}

/// The projections the catalog needs, in registration order
pub fn required_projections() -> Vec<ProjectionDefinition> {
    RecipeProjection::ALL
        .into_iter()
        .map(ProjectionDefinition::from)
        .collect()
}
