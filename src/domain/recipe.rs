// Copyright (c) 2025 - Cowboy AI, Inc.
//! Recipe submission payload
//!
//! The payload a client submits with AddRecipe. Only `recipe.name` is
//! interpreted by the command side. Every other field, known or not and
//! whatever its JSON shape (including explicit `null`s), stays an untyped
//! value so the submission can be handed back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::RecipeName;

/// Top-level AddRecipe payload: `{"recipe": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSubmission {
    pub recipe: Recipe,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A recipe as submitted by a client
///
/// `overallTime`, `ingredients` and `steps` are conventional but optional and
/// untyped; they live in `fields` next to anything else the client sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: RecipeName,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Recipe {
    /// Create a recipe with only a name
    pub fn named(name: RecipeName) -> Self {
        Self {
            name,
            fields: Map::new(),
        }
    }

    /// Set the overall time; minutes by convention, any JSON value accepted
    pub fn with_overall_time(self, overall_time: impl Into<Value>) -> Self {
        self.with_field("overallTime", overall_time)
    }

    /// Set the ingredient list
    pub fn with_ingredients(self, ingredients: Vec<Value>) -> Self {
        self.with_field("ingredients", ingredients)
    }

    /// Set the preparation steps
    pub fn with_steps(self, steps: Vec<Value>) -> Self {
        self.with_field("steps", steps)
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn overall_time(&self) -> Option<&Value> {
        self.fields.get("overallTime")
    }

    /// Render as the JSON object stored in `RecipeAdded.recipe`
    pub fn into_value(self) -> Value {
        let mut object = self.fields;
        object.insert("name".to_string(), Value::String(self.name.into()));
        Value::Object(object)
    }
}

impl RecipeSubmission {
    pub fn new(recipe: Recipe) -> Self {
        Self {
            recipe,
            extra: Map::new(),
        }
    }

    pub fn name(&self) -> &RecipeName {
        &self.recipe.name
    }

    /// Render as the `RecipeAdded` event data
    pub fn into_payload(self) -> Value {
        let mut object = self.extra;
        object.insert("recipe".to_string(), self.recipe.into_value());
        Value::Object(object)
    }
}
