// Copyright (c) 2025 - Cowboy AI, Inc.

//! Stream naming for recipe events
//!
//! Every recipe owns exactly one stream:
//!
//! ```text
//! Recipe-{recipeName}
//! ```
//!
//! The category of a stream is the prefix before the first `-`. The Log
//! Store's `$by_category` index groups all `Recipe-*` streams so category-wide
//! projections (`fromCategory('Recipe')`) can fold over them.
//!
//! # Examples
//!
//! ```rust
//! use recipe_catalog::domain::RecipeName;
//! use recipe_catalog::streams::{category_of, StreamName, RECIPE_CATEGORY};
//!
//! let name = RecipeName::new("Apple-Pie").unwrap();
//! let stream = StreamName::for_recipe(&name);
//! assert_eq!(stream.as_str(), "Recipe-Apple-Pie");
//! assert_eq!(category_of(stream.as_str()), Some(RECIPE_CATEGORY));
//! ```

use std::fmt;

use crate::domain::RecipeName;

/// Category shared by all recipe streams
pub const RECIPE_CATEGORY: &str = "Recipe";

/// Separator between category and entity id in a stream name
pub const CATEGORY_SEPARATOR: char = '-';

/// Name of an event stream in the Log Store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StreamName(String);

impl StreamName {
    /// Stream holding all events of one recipe
    pub fn for_recipe(name: &RecipeName) -> Self {
        Self(format!("{}{}{}", RECIPE_CATEGORY, CATEGORY_SEPARATOR, name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Category of this stream
    pub fn category(&self) -> Option<&str> {
        category_of(&self.0)
    }
}

impl fmt::Display for StreamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StreamName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Category of a stream name: the prefix before the first `-`
///
/// Streams without a separator have no category.
pub fn category_of(stream: &str) -> Option<&str> {
    stream
        .split_once(CATEGORY_SEPARATOR)
        .map(|(category, _)| category)
}
