// Copyright (c) 2025 - Cowboy AI, Inc.
//! Recipe Projection Definitions
//!
//! The three continuous projections the catalog reads from. Each definition
//! exists twice:
//!
//! - as JavaScript source, registered with the Log Store at bootstrap and
//!   executed there (`js/*.js`)
//! - as a pure Rust fold with an explicit accumulator, used by
//!   [`InMemoryLogStore`](crate::log_store::InMemoryLogStore) and tests
//!
//! | Projection             | Scope      | Initial state      | On `RecipeAdded(e)`                |
//! |------------------------|------------|--------------------|------------------------------------|
//! | `all-recipe-names`     | category   | `[]`               | push `e.data.recipe.name`          |
//! | `all-recipe-summaries` | category   | `[]`               | push `{name, overallTime}`         |
//! | `recipe`               | per stream | `{"recipe": null}` | `recipe = e.data.recipe`           |
//!
//! Every other event type leaves the state unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::pure::{replay_projection, PureProjection};
use crate::events::{EventEnvelope, RecipeEventType};

/// Summary shown for a recipe with no usable overall time
pub const UNKNOWN_TIME: &str = "Unknown time";

/// How a projection's output is partitioned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partitioning {
    /// One state for the whole `Recipe` category
    Category,
    /// One state per source stream, keyed by stream name
    PerStream,
}

/// The continuous projections required by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipeProjection {
    AllRecipeNames,
    AllRecipeSummaries,
    Recipe,
}

impl RecipeProjection {
    pub const ALL: [RecipeProjection; 3] = [
        RecipeProjection::AllRecipeNames,
        RecipeProjection::AllRecipeSummaries,
        RecipeProjection::Recipe,
    ];

    /// Projection name as registered in the Log Store
    pub fn name(&self) -> &'static str {
        match self {
            RecipeProjection::AllRecipeNames => "all-recipe-names",
            RecipeProjection::AllRecipeSummaries => "all-recipe-summaries",
            RecipeProjection::Recipe => "recipe",
        }
    }

    /// JavaScript source registered with the Log Store
    pub fn source(&self) -> &'static str {
        match self {
            RecipeProjection::AllRecipeNames => include_str!("js/all-recipe-names.js"),
            RecipeProjection::AllRecipeSummaries => include_str!("js/all-recipe-summaries.js"),
            RecipeProjection::Recipe => include_str!("js/recipe.js"),
        }
    }

    pub fn partitioning(&self) -> Partitioning {
        match self {
            RecipeProjection::Recipe => Partitioning::PerStream,
            _ => Partitioning::Category,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Replay `events` through this projection and render the state as JSON
    pub fn replay<'a, I>(&self, events: I) -> Value
    where
        I: IntoIterator<Item = &'a EventEnvelope>,
    {
        match self {
            RecipeProjection::AllRecipeNames => to_json(replay_projection(
                names_projection as PureProjection<RecipeNames, EventEnvelope>,
                events,
            )),
            RecipeProjection::AllRecipeSummaries => to_json(replay_projection(
                summaries_projection as PureProjection<RecipeSummaries, EventEnvelope>,
                events,
            )),
            RecipeProjection::Recipe => to_json(replay_projection(
                recipe_projection as PureProjection<RecipeState, EventEnvelope>,
                events,
            )),
        }
    }
}

fn to_json<S: Serialize>(state: S) -> Value {
    // Projection states are plain lists and maps of JSON values
    serde_json::to_value(state).unwrap_or(Value::Null)
}

/// `all-recipe-names` accumulator
///
/// A `RecipeAdded` without a recipe name contributes a `null` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeNames(pub Vec<Option<String>>);

impl RecipeNames {
    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|known| known == name)
    }

    /// Listed names, skipping entries without one
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|name| name.as_deref())
    }
}

impl<S: Into<String>> FromIterator<S> for RecipeNames {
    fn from_iter<I: IntoIterator<Item = S>>(names: I) -> Self {
        Self(names.into_iter().map(|name| Some(name.into())).collect())
    }
}

/// One entry of `all-recipe-summaries`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    /// Absent when the recipe had no name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "overallTime")]
    pub overall_time: String,
}

/// `all-recipe-summaries` accumulator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeSummaries(pub Vec<RecipeSummary>);

/// `recipe` accumulator for one stream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeState {
    pub recipe: Option<Value>,
}

fn added_recipe(event: &EventEnvelope) -> Option<&Value> {
    match event.event_type {
        RecipeEventType::RecipeAdded => event.data.get("recipe"),
        RecipeEventType::RecipeCooked | RecipeEventType::RecipeFollowingStarted => None,
    }
}

fn recipe_name(recipe: &Value) -> Option<String> {
    match recipe.get("name") {
        Some(Value::String(name)) => Some(name.clone()),
        None | Some(Value::Null) => None,
        Some(other) => Some(other.to_string()),
    }
}

pub fn names_projection(mut state: RecipeNames, event: &EventEnvelope) -> RecipeNames {
    if let Some(recipe) = added_recipe(event) {
        state.0.push(recipe_name(recipe));
    }
    state
}

pub fn summaries_projection(mut state: RecipeSummaries, event: &EventEnvelope) -> RecipeSummaries {
    if let Some(recipe) = added_recipe(event) {
        state.0.push(RecipeSummary {
            name: recipe_name(recipe),
            overall_time: format_overall_time(recipe.get("overallTime")),
        });
    }
    state
}

pub fn recipe_projection(state: RecipeState, event: &EventEnvelope) -> RecipeState {
    match added_recipe(event) {
        Some(recipe) => RecipeState {
            recipe: Some(recipe.clone()),
        },
        None => state,
    }
}

/// Render an overall time the way the store-side projection does
///
/// Falsy values (absent, `null`, `false`, `0`, `""`) read as unknown; numbers,
/// strings and `true` get a `min` suffix. Whole floats print without a fraction.
/// Arrays and objects read as unknown.
pub fn format_overall_time(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                if i == 0 {
                    return UNKNOWN_TIME.to_string();
                }
                return format!("{}min", i);
            }
            match n.as_f64() {
                Some(f) if f == 0.0 || f.is_nan() => UNKNOWN_TIME.to_string(),
                Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}min", f as i64),
                Some(f) => format!("{}min", f),
                None => format!("{}min", n),
            }
        }
        Some(Value::String(s)) if !s.is_empty() => format!("{}min", s),
        Some(Value::Bool(true)) => "truemin".to_string(),
        _ => UNKNOWN_TIME.to_string(),
    }
}
