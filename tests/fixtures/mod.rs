// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for recipe-catalog
//!
//! Fixed payloads and ids so tests are reproducible, plus a bounded poll for
//! assertions on eventually consistent projection state.

#![allow(dead_code)]

use std::future::Future;
use std::time::Duration;

use serde_json::{json, Value};
use uuid::Uuid;

use recipe_catalog::log_store::InMemoryLogStore;
use recipe_catalog::service::EventSourcedRecipeService;

pub const EVENT_ID_1: &str = "6f1c2a4e-8b3d-4c5e-9f60-000000000001";
pub const EVENT_ID_2: &str = "6f1c2a4e-8b3d-4c5e-9f60-000000000002";

/// Attempts made by [`eventually`] before giving up
pub const POLL_ATTEMPTS: usize = 100;
/// Delay between attempts
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

pub fn parse_uuid(s: &str) -> Uuid {
    Uuid::parse_str(s).expect("Invalid UUID in test fixture")
}

pub fn pancakes() -> Value {
    json!({
        "recipe": {
            "name": "Pancakes",
            "overallTime": 15,
            "ingredients": [
                {"name": "flour", "amount": "200g"},
                {"name": "milk", "amount": "300ml"}
            ],
            "steps": ["Whisk", "Rest", "Fry"]
        }
    })
}

pub fn toast() -> Value {
    json!({"recipe": {"name": "Toast", "ingredients": [], "steps": ["Toast it"]}})
}

pub fn named(name: &str) -> Value {
    json!({"recipe": {"name": name}})
}

/// Fresh in-memory store with a service bound to it
pub fn memory_service() -> (InMemoryLogStore, EventSourcedRecipeService<InMemoryLogStore>) {
    let store = InMemoryLogStore::new();
    (store.clone(), EventSourcedRecipeService::new(store))
}

/// Poll `probe` until it yields a value
///
/// Panics after [`POLL_ATTEMPTS`] tries.
pub async fn eventually<T, F, Fut>(mut probe: F) -> T
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    for _ in 0..POLL_ATTEMPTS {
        if let Some(value) = probe().await {
            return value;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
    panic!("condition not reached within {:?}", POLL_INTERVAL * POLL_ATTEMPTS as u32);
}
