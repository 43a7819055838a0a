// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event envelope construction

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Recipe event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecipeEventType {
    RecipeAdded,
    RecipeCooked,
    RecipeFollowingStarted,
}

impl RecipeEventType {
    /// Wire name of the event type
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeEventType::RecipeAdded => "RecipeAdded",
            RecipeEventType::RecipeCooked => "RecipeCooked",
            RecipeEventType::RecipeFollowingStarted => "RecipeFollowingStarted",
        }
    }
}

impl fmt::Display for RecipeEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A uniquely identified, typed event ready to be appended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
    pub event_id: Uuid,
    pub event_type: RecipeEventType,
    pub data: Value,
}

impl EventEnvelope {
    /// Build an envelope with a fresh random (v4) event id
    ///
    /// `data` is attached unchanged; its shape is the caller's concern.
    pub fn build(event_type: RecipeEventType, data: Value) -> Self {
        Self::new(Uuid::new_v4(), event_type, data)
    }

    /// Build an envelope with a caller-chosen event id
    pub fn new(event_id: Uuid, event_type: RecipeEventType, data: Value) -> Self {
        Self {
            event_id,
            event_type,
            data,
        }
    }
}
