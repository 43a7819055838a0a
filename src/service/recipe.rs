// Copyright (c) 2025 - Cowboy AI, Inc.
//! Recipe Service Layer
//!
//! Application service for the recipe catalog. Commands are validated by the
//! pure handlers in [`crate::aggregate`] and appended to the Log Store;
//! queries read continuous projection state back out of it.
//!
//! # Service Pattern
//!
//! ```text
//! Command → Service → (read all-recipe-names) → Handler → append
//! Query   → Service → read projection state → typed result
//! ```
//!
//! # Consistency
//!
//! The duplicate-name check reads a projection, so it is only as current as
//! that projection. Two AddRecipe calls for the same name can both pass the
//! check before either event is projected. With
//! [`with_conditional_add`](EventSourcedRecipeService::with_conditional_add)
//! the append additionally requires the stream to be new, which closes the
//! window on stores that honour `ES-ExpectedVersion`.
//!
//! # Empty vs. missing
//!
//! Category-wide reads with no projection state yet answer with an empty
//! list. A single-recipe read with no state is an error.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::aggregate::commands::*;
use crate::aggregate::handlers::*;
use crate::domain::RecipeName;
use crate::errors::LogError;
use crate::log_store::{ExpectedVersion, LogStore};
use crate::projection::{RecipeNames, RecipeProjection, RecipeSummaries, RecipeSummary};
use crate::streams::StreamName;

/// Service layer result type
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Conflict message for a name that is already taken
pub const DUPLICATE_NAME: &str = "duplicate name";

/// Service layer errors
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A domain precondition failed
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The request could not be turned into a command
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Projection state did not have the expected shape
    #[error("Unexpected projection state: {0}")]
    UnexpectedState(String),

    /// Log Store failure
    #[error("Log store error: {0}")]
    Store(#[from] LogError),
}

impl From<CommandError> for ServiceError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::DuplicateName(_) => ServiceError::Conflict(DUPLICATE_NAME.to_string()),
            CommandError::InvalidRecipeName(_) | CommandError::InvalidPayload(_) => {
                ServiceError::InvalidInput(err.to_string())
            }
        }
    }
}

/// Acknowledgment of an accepted command
///
/// Says nothing about when the event becomes visible in projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ack {
    pub message: &'static str,
}

impl Ack {
    pub const ADDED: Ack = Ack { message: "Added" };
    pub const COOKED: Ack = Ack { message: "Cooked" };
    pub const FOLLOWING: Ack = Ack { message: "Following" };
}

/// Recipe catalog service
#[async_trait]
pub trait RecipeService: Send + Sync {
    /// Add a recipe from a raw `{"recipe": {...}}` payload
    ///
    /// Fails with [`ServiceError::Conflict`] if the name is already listed
    /// in `all-recipe-names`.
    async fn add_recipe(&self, payload: Value) -> ServiceResult<Ack>;

    /// Record that a recipe was cooked; the recipe need not exist
    async fn recipe_cooked(&self, name: &str) -> ServiceResult<Ack>;

    /// Record that someone started following a recipe; the recipe need not exist
    async fn recipe_following_started(&self, name: &str) -> ServiceResult<Ack>;

    /// Names of all added recipes, in append order
    async fn list_recipe_names(&self) -> ServiceResult<Vec<String>>;

    /// Summaries of all added recipes, in append order
    async fn list_recipe_summaries(&self) -> ServiceResult<Vec<RecipeSummary>>;

    /// Latest submitted payload of one recipe
    ///
    /// Returns `Value::Null` for a stream that holds events but no
    /// `RecipeAdded`. A stream with no events is a [`LogError::NotFound`].
    async fn get_recipe(&self, name: &str) -> ServiceResult<Value>;
}

/// Event-sourced implementation of [`RecipeService`]
///
/// Holds nothing but the injected store; clone the store handle (for
/// example an `Arc`) to share it between services.
#[derive(Debug, Clone)]
pub struct EventSourcedRecipeService<S> {
    store: S,
    conditional_add: bool,
}

impl<S: LogStore> EventSourcedRecipeService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            conditional_add: false,
        }
    }

    /// Require AddRecipe to start a new stream
    ///
    /// A name whose stream already holds Cooked or Following events is then
    /// rejected as a duplicate too.
    pub fn with_conditional_add(mut self, enabled: bool) -> Self {
        self.conditional_add = enabled;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read category-wide projection state, treating "no state yet" as empty
    async fn read_category<T>(&self, projection: RecipeProjection) -> ServiceResult<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.store.read_projection(projection.name()).await {
            Ok(state) => decode_state(projection, state),
            Err(LogError::NotFound) => {
                debug!(projection = projection.name(), "No projection state yet");
                Ok(T::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn append(&self, pending: PendingAppend, expected: ExpectedVersion) -> ServiceResult<()> {
        self.store
            .append(&pending.stream, &pending.event, expected)
            .await?;

        info!(
            stream = %pending.stream,
            event_type = %pending.event.event_type,
            event_id = %pending.event.event_id,
            "Appended event"
        );
        Ok(())
    }
}

fn decode_state<T: DeserializeOwned>(projection: RecipeProjection, state: Value) -> ServiceResult<T> {
    serde_json::from_value(state)
        .map_err(|e| ServiceError::UnexpectedState(format!("{}: {}", projection.name(), e)))
}

#[async_trait]
impl<S: LogStore> RecipeService for EventSourcedRecipeService<S> {
    async fn add_recipe(&self, payload: Value) -> ServiceResult<Ack> {
        let command = AddRecipeCommand::from_payload(payload)?;
        let known: RecipeNames = self.read_category(RecipeProjection::AllRecipeNames).await?;

        let pending = handle_add_recipe(&known, command)?;

        let expected = if self.conditional_add {
            ExpectedVersion::NoStream
        } else {
            ExpectedVersion::Any
        };

        match self.append(pending, expected).await {
            Ok(()) => Ok(Ack::ADDED),
            Err(ServiceError::Store(LogError::WrongExpectedVersion { stream })) => {
                debug!(%stream, "Recipe stream already exists");
                Err(ServiceError::Conflict(DUPLICATE_NAME.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    async fn recipe_cooked(&self, name: &str) -> ServiceResult<Ack> {
        let pending = handle_recipe_cooked(RecipeCookedCommand::parse(name)?);
        self.append(pending, ExpectedVersion::Any).await?;
        Ok(Ack::COOKED)
    }

    async fn recipe_following_started(&self, name: &str) -> ServiceResult<Ack> {
        let pending = handle_start_following(StartFollowingCommand::parse(name)?);
        self.append(pending, ExpectedVersion::Any).await?;
        Ok(Ack::FOLLOWING)
    }

    async fn list_recipe_names(&self) -> ServiceResult<Vec<String>> {
        let names: RecipeNames = self.read_category(RecipeProjection::AllRecipeNames).await?;
        Ok(names.names().map(str::to_string).collect())
    }

    async fn list_recipe_summaries(&self) -> ServiceResult<Vec<RecipeSummary>> {
        let summaries: RecipeSummaries = self
            .read_category(RecipeProjection::AllRecipeSummaries)
            .await?;
        Ok(summaries.0)
    }

    async fn get_recipe(&self, name: &str) -> ServiceResult<Value> {
        let name = RecipeName::new(name).map_err(CommandError::from)?;
        let stream = StreamName::for_recipe(&name);

        let state = self
            .store
            .read_partitioned_projection(RecipeProjection::Recipe.name(), stream.as_str())
            .await?;

        let mut state: serde_json::Map<String, Value> =
            decode_state(RecipeProjection::Recipe, state)?;
        Ok(state.remove("recipe").unwrap_or(Value::Null))
    }
}
