// Copyright (c) 2025 - Cowboy AI, Inc.
//! Recipe Domain Models
//!
//! # Value Objects with Invariants
//!
//! - [`RecipeName`] - URL-safe recipe name, embedded in stream names
//!
//! # Payloads
//!
//! - [`RecipeSubmission`] - AddRecipe payload, carried verbatim into events

pub mod recipe;
pub mod recipe_name;

pub use recipe::{Recipe, RecipeSubmission};
pub use recipe_name::{RecipeName, RecipeNameError};
