// Copyright (c) 2025 - Cowboy AI, Inc.
//! Recipe Domain Events
//!
//! Events are immutable facts appended to a recipe's stream. Each one travels
//! in an [`EventEnvelope`] carrying a client-generated id, a type tag and an
//! opaque JSON payload:
//!
//! ```text
//! { "eventId": "<uuid v4>", "eventType": "RecipeAdded", "data": {...} }
//! ```
//!
//! # Event Types
//!
//! - `RecipeAdded` - a new recipe was submitted; `data` is the submission
//! - `RecipeCooked` - someone cooked the recipe; `data` is `{}`
//! - `RecipeFollowingStarted` - someone started following it; `data` is `{}`
//!
//! Within a stream, events are ordered by append order. Nothing here ever
//! modifies or deletes an appended event.

pub mod envelope;

pub use envelope::{EventEnvelope, RecipeEventType};
