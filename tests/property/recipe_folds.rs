// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Recipe Projection Folds
//!
//! The folds registered with the Log Store are reproduced in Rust; these
//! properties pin down their behavior for arbitrary event histories.

use proptest::prelude::*;
use serde_json::{json, Value};

use recipe_catalog::events::{EventEnvelope, RecipeEventType};
use recipe_catalog::projection::pure::{fold_projection, replay_projection};
use recipe_catalog::projection::recipe::{
    names_projection, recipe_projection, summaries_projection, RecipeNames, RecipeState,
    RecipeSummaries, UNKNOWN_TIME,
};
use recipe_catalog::projection::RecipeProjection;

// ============================================================================
// Strategies
// ============================================================================

fn recipe_name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9._~-]{1,24}"
}

fn recipe() -> impl Strategy<Value = Value> {
    (recipe_name(), prop::option::of(0u32..600)).prop_map(|(name, overall_time)| {
        match overall_time {
            Some(minutes) => json!({"name": name, "overallTime": minutes, "steps": []}),
            None => json!({"name": name, "steps": []}),
        }
    })
}

fn recipe_event() -> impl Strategy<Value = EventEnvelope> {
    prop_oneof![
        3 => recipe().prop_map(|recipe| {
            EventEnvelope::build(RecipeEventType::RecipeAdded, json!({ "recipe": recipe }))
        }),
        1 => Just(RecipeEventType::RecipeCooked)
            .prop_map(|event_type| EventEnvelope::build(event_type, json!({}))),
        1 => Just(RecipeEventType::RecipeFollowingStarted)
            .prop_map(|event_type| EventEnvelope::build(event_type, json!({}))),
    ]
}

fn history() -> impl Strategy<Value = Vec<EventEnvelope>> {
    prop::collection::vec(recipe_event(), 0..40)
}

fn added_recipes(events: &[EventEnvelope]) -> Vec<&Value> {
    events
        .iter()
        .filter(|event| event.event_type == RecipeEventType::RecipeAdded)
        .map(|event| &event.data["recipe"])
        .collect()
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Names are listed once per RecipeAdded, in append order
    #[test]
    fn prop_names_follow_added_events(events in history()) {
        let names: RecipeNames = replay_projection(names_projection, &events);

        let expected: Vec<Option<String>> = added_recipes(&events)
            .into_iter()
            .map(|recipe| recipe["name"].as_str().map(str::to_string))
            .collect();

        prop_assert_eq!(names.0, expected);
    }

    /// Property: Each summary pairs a name with its formatted overall time
    #[test]
    fn prop_summaries_match_added_events(events in history()) {
        let summaries: RecipeSummaries = replay_projection(summaries_projection, &events);
        let added = added_recipes(&events);

        prop_assert_eq!(summaries.0.len(), added.len());
        for (summary, recipe) in summaries.0.iter().zip(added) {
            prop_assert_eq!(summary.name.as_deref(), recipe["name"].as_str());

            let expected = match recipe["overallTime"].as_u64() {
                Some(minutes) if minutes > 0 => format!("{}min", minutes),
                _ => UNKNOWN_TIME.to_string(),
            };
            prop_assert_eq!(&summary.overall_time, &expected);
        }
    }

    /// Property: Recipe state is the latest RecipeAdded payload
    #[test]
    fn prop_recipe_state_is_latest_added(events in history()) {
        let state: RecipeState = replay_projection(recipe_projection, &events);
        let latest = added_recipes(&events).last().map(|recipe| (*recipe).clone());

        prop_assert_eq!(state.recipe, latest);
    }

    /// Property: Cooked and Following events never change any projection
    #[test]
    fn prop_non_added_events_are_ignored(events in history()) {
        let added_only: Vec<EventEnvelope> = events
            .iter()
            .filter(|event| event.event_type == RecipeEventType::RecipeAdded)
            .cloned()
            .collect();

        for projection in RecipeProjection::ALL {
            prop_assert_eq!(projection.replay(&events), projection.replay(&added_only));
        }
    }

    /// Property: Folding in two chunks equals folding the whole history
    ///
    /// fold(fold(init, a), b) = fold(init, a ++ b)
    #[test]
    fn prop_chunked_fold_equals_whole(first in history(), second in history()) {
        let all: Vec<EventEnvelope> = first.iter().chain(second.iter()).cloned().collect();

        let chunked = fold_projection(
            names_projection,
            fold_projection(names_projection, RecipeNames::default(), &first),
            &second,
        );
        prop_assert_eq!(chunked, replay_projection(names_projection, &all));

        let chunked = fold_projection(
            summaries_projection,
            fold_projection(summaries_projection, RecipeSummaries::default(), &first),
            &second,
        );
        prop_assert_eq!(chunked, replay_projection(summaries_projection, &all));

        let chunked = fold_projection(
            recipe_projection,
            fold_projection(recipe_projection, RecipeState::default(), &first),
            &second,
        );
        prop_assert_eq!(chunked, replay_projection(recipe_projection, &all));
    }

    /// Property: Replay is deterministic
    #[test]
    fn prop_replay_is_deterministic(events in history()) {
        for projection in RecipeProjection::ALL {
            prop_assert_eq!(projection.replay(&events), projection.replay(&events));
        }
    }
}
