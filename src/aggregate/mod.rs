// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Functional Command Side
//!
//! Commands are validated by pure functions that turn intent into a
//! [`PendingAppend`]: the event to write and the stream to write it to.
//! Performing the append is the service layer's job.
//!
//! ```text
//! Command → Handler → PendingAppend → LogStore::append
//!    ↓         ↓            ↓
//! Intent   Validation    Fact-to-be
//! ```
//!
//! # Example
//!
//! ```rust
//! use recipe_catalog::aggregate::{handle_add_recipe, AddRecipeCommand, CommandError};
//! use recipe_catalog::projection::RecipeNames;
//! use serde_json::json;
//!
//! let command = AddRecipeCommand::from_payload(json!({"recipe": {"name": "Pancakes"}})).unwrap();
//! let pending = handle_add_recipe(&RecipeNames::default(), command.clone()).unwrap();
//! assert_eq!(pending.stream.as_str(), "Recipe-Pancakes");
//!
//! let known = RecipeNames::from_iter(["Pancakes"]);
//! assert!(matches!(
//!     handle_add_recipe(&known, command),
//!     Err(CommandError::DuplicateName(_))
//! ));
//! ```

pub mod commands;
pub mod handlers;

pub use commands::*;
pub use handlers::*;
