// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the In-Memory Log Store
//!
//! Whatever mix of appends the catalog performs, the store keeps one global
//! order, keeps each stream in append order, and serves projection state that
//! equals a replay of what was appended.

use proptest::prelude::*;
use serde_json::json;

use recipe_catalog::domain::RecipeName;
use recipe_catalog::events::{EventEnvelope, RecipeEventType};
use recipe_catalog::log_store::{ExpectedVersion, InMemoryLogStore, LogStore};
use recipe_catalog::projection::{bootstrap, required_projections, RecipeProjection};
use recipe_catalog::streams::StreamName;

/// An append against one of a handful of recipe streams
#[derive(Debug, Clone)]
struct Append {
    recipe: usize,
    event_type: RecipeEventType,
}

const RECIPES: [&str; 4] = ["Pancakes", "Toast", "Soup", "Stew"];

fn append() -> impl Strategy<Value = Append> {
    (
        0..RECIPES.len(),
        prop_oneof![
            Just(RecipeEventType::RecipeAdded),
            Just(RecipeEventType::RecipeCooked),
            Just(RecipeEventType::RecipeFollowingStarted),
        ],
    )
        .prop_map(|(recipe, event_type)| Append { recipe, event_type })
}

fn envelope(op: &Append) -> EventEnvelope {
    let data = match op.event_type {
        RecipeEventType::RecipeAdded => json!({"recipe": {"name": RECIPES[op.recipe]}}),
        _ => json!({}),
    };
    EventEnvelope::build(op.event_type, data)
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    /// Property: Stored order equals append order, globally and per stream
    #[test]
    fn prop_append_order_is_preserved(ops in prop::collection::vec(append(), 0..30)) {
        let (stored, appended, per_stream) = runtime().block_on(async {
            let store = InMemoryLogStore::new();
            let mut appended = Vec::new();

            for op in &ops {
                let name = RecipeName::new(RECIPES[op.recipe]).unwrap();
                let event = envelope(op);
                store
                    .append(&StreamName::for_recipe(&name), &event, ExpectedVersion::Any)
                    .await
                    .unwrap();
                appended.push(event);
            }

            let mut per_stream = Vec::new();
            for recipe in RECIPES {
                let events = store.stream_events(&format!("Recipe-{}", recipe)).await;
                per_stream.push(events);
            }
            (store.all_events().await, appended, per_stream)
        });

        let positions: Vec<u64> = stored.iter().map(|e| e.position).collect();
        prop_assert_eq!(positions, (0..ops.len() as u64).collect::<Vec<_>>());

        let stored_events: Vec<EventEnvelope> = stored.into_iter().map(|e| e.event).collect();
        prop_assert_eq!(stored_events, appended);

        for events in per_stream {
            let versions: Vec<u64> = events.iter().map(|e| e.stream_version).collect();
            prop_assert_eq!(versions, (0..events.len() as u64).collect::<Vec<_>>());
        }
    }

    /// Property: Category projection state equals a replay of the category
    #[test]
    fn prop_projection_state_matches_replay(ops in prop::collection::vec(append(), 1..30)) {
        let (served, appended) = runtime().block_on(async {
            let store = InMemoryLogStore::new();
            bootstrap(&store, &required_projections()).await;

            let mut appended = Vec::new();
            for op in &ops {
                let name = RecipeName::new(RECIPES[op.recipe]).unwrap();
                let event = envelope(op);
                store
                    .append(&StreamName::for_recipe(&name), &event, ExpectedVersion::Any)
                    .await
                    .unwrap();
                appended.push(event);
            }

            let names = store.read_projection("all-recipe-names").await.unwrap();
            let summaries = store.read_projection("all-recipe-summaries").await.unwrap();
            ((names, summaries), appended)
        });

        prop_assert_eq!(served.0, RecipeProjection::AllRecipeNames.replay(&appended));
        prop_assert_eq!(served.1, RecipeProjection::AllRecipeSummaries.replay(&appended));
    }
}
