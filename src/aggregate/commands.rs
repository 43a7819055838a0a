// Copyright (c) 2025 - Cowboy AI, Inc.
//! Recipe Commands
//!
//! Commands express user intent and can fail validation.
//!
//! ```text
//! Command → handle_command(State, Command) → Result<PendingAppend, Error>
//! ```
//!
//! # Identity as Parameter
//!
//! Every command carries the id its event will be appended under. Ids are
//! drawn when the command is constructed, so handlers stay deterministic and
//! tests can pin ids with the `with_event_id` setters.

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use super::handlers::CommandError;
use crate::domain::{RecipeName, RecipeSubmission};

/// Command to add a new recipe to the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct AddRecipeCommand {
    /// Validated `recipe.name`
    pub name: RecipeName,

    /// The submitted payload, carried into the event unchanged
    pub payload: Value,

    /// Id for the `RecipeAdded` event
    pub event_id: Uuid,
}

impl AddRecipeCommand {
    pub fn new(submission: RecipeSubmission) -> Self {
        Self {
            name: submission.name().clone(),
            payload: submission.into_payload(),
            event_id: Uuid::new_v4(),
        }
    }

    /// Validate a raw `{"recipe": {...}}` payload, keeping it as submitted
    pub fn from_payload(payload: Value) -> Result<Self, CommandError> {
        let submission = RecipeSubmission::deserialize(&payload)
            .map_err(|e| CommandError::InvalidPayload(e.to_string()))?;
        Ok(Self {
            name: submission.name().clone(),
            payload,
            event_id: Uuid::new_v4(),
        })
    }

    pub fn with_event_id(mut self, event_id: Uuid) -> Self {
        self.event_id = event_id;
        self
    }

    pub fn name(&self) -> &RecipeName {
        &self.name
    }
}

/// Command to record that a recipe was cooked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeCookedCommand {
    pub name: RecipeName,
    pub event_id: Uuid,
}

impl RecipeCookedCommand {
    pub fn new(name: RecipeName) -> Self {
        Self {
            name,
            event_id: Uuid::new_v4(),
        }
    }

    /// Validate a raw recipe name
    pub fn parse(name: &str) -> Result<Self, CommandError> {
        Ok(Self::new(RecipeName::new(name)?))
    }

    pub fn with_event_id(mut self, event_id: Uuid) -> Self {
        self.event_id = event_id;
        self
    }
}

/// Command to record that someone started following a recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartFollowingCommand {
    pub name: RecipeName,
    pub event_id: Uuid,
}

impl StartFollowingCommand {
    pub fn new(name: RecipeName) -> Self {
        Self {
            name,
            event_id: Uuid::new_v4(),
        }
    }

    /// Validate a raw recipe name
    pub fn parse(name: &str) -> Result<Self, CommandError> {
        Ok(Self::new(RecipeName::new(name)?))
    }

    pub fn with_event_id(mut self, event_id: Uuid) -> Self {
        self.event_id = event_id;
        self
    }
}
