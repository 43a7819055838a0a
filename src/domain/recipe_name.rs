// Copyright (c) 2025 - Cowboy AI, Inc.
//! Recipe Name Value Object with URL-Safety Invariants

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Recipe name validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecipeNameError {
    #[error("Recipe name is empty")]
    Empty,

    #[error("Recipe name exceeds maximum length of 200 bytes: {0}")]
    TooLong(usize),

    #[error("Invalid character in recipe name: {0:?}")]
    InvalidCharacter(char),
}

/// Name of a recipe, embedded verbatim in its stream name
///
/// Only RFC 3986 unreserved characters are accepted so the name can appear
/// in a URL path segment and a query string without escaping:
/// - ASCII letters and digits
/// - `-`, `.`, `_`, `~`
///
/// # Examples
///
/// ```rust
/// use recipe_catalog::domain::RecipeName;
///
/// let name = RecipeName::new("Pancakes").unwrap();
/// assert_eq!(name.as_str(), "Pancakes");
///
/// assert!(RecipeName::new("").is_err());
/// assert!(RecipeName::new("Apple pie").is_err()); // space
/// assert!(RecipeName::new("a/b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecipeName(String);

impl RecipeName {
    /// Maximum name length in bytes
    pub const MAX_LENGTH: usize = 200;

    /// Create a new recipe name with validation
    pub fn new(name: impl Into<String>) -> Result<Self, RecipeNameError> {
        let name = name.into();

        if name.is_empty() {
            return Err(RecipeNameError::Empty);
        }

        if name.len() > Self::MAX_LENGTH {
            return Err(RecipeNameError::TooLong(name.len()));
        }

        if let Some(ch) = name.chars().find(|ch| !Self::is_unreserved(*ch)) {
            return Err(RecipeNameError::InvalidCharacter(ch));
        }

        Ok(Self(name))
    }

    fn is_unreserved(ch: char) -> bool {
        ch.is_ascii_alphanumeric() || matches!(ch, '-' | '.' | '_' | '~')
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecipeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<RecipeName> for String {
    fn from(name: RecipeName) -> Self {
        name.0
    }
}

impl TryFrom<String> for RecipeName {
    type Error = RecipeNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for RecipeName {
    type Error = RecipeNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
