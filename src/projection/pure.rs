// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Projection Folds
//!
//! A projection is a pure function `(State, &Event) → State` with an explicit
//! initial state. Replaying a projection is a left fold of the event history
//! through that function:
//!
//! ```text
//! init ──e1──> s1 ──e2──> s2 ──e3──> s3 = state
//! ```
//!
//! Recipe projections are non-emitting, so unlike a general read-side
//! projection there are no side effects to return alongside the state.
//!
//! # Example
//!
//! ```rust
//! use recipe_catalog::projection::pure::fold_projection;
//!
//! fn count(state: usize, _event: &&str) -> usize {
//!     state + 1
//! }
//!
//! let events = ["a", "b", "c"];
//! assert_eq!(fold_projection(count, 0, &events), 3);
//! ```

use std::fmt::Debug;

/// Pure projection function type
///
/// Takes the current state and one event, returns the next state.
pub type PureProjection<S, E> = fn(S, &E) -> S;

/// Trait for pure projection state
///
/// The `Default` value is the projection's initial state.
pub trait ProjectionState: Clone + Debug + Default {}

impl<T: Clone + Debug + Default> ProjectionState for T {}

/// Fold a sequence of events through a pure projection
pub fn fold_projection<'a, S, E, I>(projection: PureProjection<S, E>, initial_state: S, events: I) -> S
where
    E: 'a,
    I: IntoIterator<Item = &'a E>,
{
    events
        .into_iter()
        .fold(initial_state, |state, event| projection(state, event))
}

/// Replay a full event history from the projection's initial state
pub fn replay_projection<'a, S, E, I>(projection: PureProjection<S, E>, events: I) -> S
where
    S: ProjectionState,
    E: 'a,
    I: IntoIterator<Item = &'a E>,
{
    fold_projection(projection, S::default(), events)
}
