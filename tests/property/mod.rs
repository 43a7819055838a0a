// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Properties of the recipe projection folds and of the in-memory Log Store
//! that must hold for every event history.

mod log_store;
mod recipe_folds;
