// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Functional Command Handlers for Recipes
//!
//! ```text
//! handle_command(State, Command) → Result<PendingAppend, CommandError>
//! ```
//!
//! Handlers do no I/O. The only state a recipe command consults is the
//! `all-recipe-names` read model, which the caller loads and passes in.
//!
//! # Business Rules
//!
//! - A recipe name may be added once (checked against the read model, so
//!   only as fresh as the projection)
//! - Cooking or following a recipe has no precondition; the first event on
//!   an unknown name simply starts its stream

use crate::aggregate::commands::*;
use crate::domain::{RecipeName, RecipeNameError};
use crate::events::{EventEnvelope, RecipeEventType};
use crate::projection::RecipeNames;
use crate::streams::StreamName;
use serde_json::{json, Value};

/// Command validation error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// A recipe with this name is already in the catalog
    #[error("Recipe {0} already exists")]
    DuplicateName(RecipeName),

    #[error("Invalid recipe name: {0}")]
    InvalidRecipeName(#[from] RecipeNameError),

    /// Payload does not have the shape of a recipe submission
    #[error("Invalid recipe payload: {0}")]
    InvalidPayload(String),
}

/// An event bound for a specific stream, produced by a handler
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAppend {
    pub stream: StreamName,
    pub event: EventEnvelope,
}

impl PendingAppend {
    fn new(name: &RecipeName, event: EventEnvelope) -> Self {
        Self {
            stream: StreamName::for_recipe(name),
            event,
        }
    }
}

/// Handle AddRecipe
///
/// # Business Rules
/// - The name must not appear in `known_names`
pub fn handle_add_recipe(
    known_names: &RecipeNames,
    command: AddRecipeCommand,
) -> Result<PendingAppend, CommandError> {
    let name = command.name().clone();

    if known_names.contains(name.as_str()) {
        return Err(CommandError::DuplicateName(name));
    }

    Ok(PendingAppend::new(
        &name,
        EventEnvelope::new(command.event_id, RecipeEventType::RecipeAdded, command.payload),
    ))
}

/// Handle RecipeCooked
pub fn handle_recipe_cooked(command: RecipeCookedCommand) -> PendingAppend {
    PendingAppend::new(
        &command.name,
        EventEnvelope::new(command.event_id, RecipeEventType::RecipeCooked, empty_data()),
    )
}

/// Handle RecipeFollowingStarted
pub fn handle_start_following(command: StartFollowingCommand) -> PendingAppend {
    PendingAppend::new(
        &command.name,
        EventEnvelope::new(
            command.event_id,
            RecipeEventType::RecipeFollowingStarted,
            empty_data(),
        ),
    )
}

fn empty_data() -> Value {
    json!({})
}
