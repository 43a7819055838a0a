// Copyright (c) 2025 - Cowboy AI, Inc.
//! Wire-format tests for the HTTP Log Store client
//!
//! A fake EventStore served by axum records every request and answers from a
//! fixed script, so paths, headers, query strings and bodies can be checked
//! byte for byte.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use recipe_catalog::config::LogStoreConfig;
use recipe_catalog::domain::RecipeName;
use recipe_catalog::errors::LogError;
use recipe_catalog::events::{EventEnvelope, RecipeEventType};
use recipe_catalog::log_store::{ExpectedVersion, HttpLogStore, LogStore};
use recipe_catalog::projection::{bootstrap, required_projections, ProjectionOutcome};
use recipe_catalog::service::{EventSourcedRecipeService, RecipeService, ServiceError};
use recipe_catalog::streams::StreamName;

/// Basic credentials for admin:changeit
const ADMIN_AUTH: &str = "Basic YWRtaW46Y2hhbmdlaXQ=";

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    query: Option<String>,
    headers: HeaderMap,
    body: String,
}

#[derive(Clone, Default)]
struct FakeStore {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeStore {
    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn last(&self) -> Recorded {
        self.requests().pop().expect("no request recorded")
    }
}

async fn handle(
    State(fake): State<FakeStore>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let recorded = Recorded {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers: headers.clone(),
        body,
    };
    fake.requests.lock().unwrap().push(recorded.clone());

    if recorded.path == "/projection/slow/state" {
        tokio::time::sleep(Duration::from_millis(1500)).await;
    }

    respond(&recorded).into_response()
}

/// Scripted EventStore behavior
fn respond(request: &Recorded) -> (StatusCode, String) {
    let query = request.query.as_deref().unwrap_or("");

    match (request.method.as_str(), request.path.as_str()) {
        ("POST", "/streams/Recipe-Taken") if request.headers.contains_key("ES-ExpectedVersion") => {
            (StatusCode::BAD_REQUEST, "Wrong expected EventNumber".to_string())
        }
        ("POST", "/streams/Recipe-Broken") => {
            (StatusCode::INTERNAL_SERVER_ERROR, "disk full".to_string())
        }
        ("POST", path) if path.starts_with("/streams/") => (StatusCode::CREATED, String::new()),

        ("GET", "/projection/all-recipe-names/state") => {
            (StatusCode::OK, json!(["Pancakes"]).to_string())
        }
        // Registered but no output yet
        ("GET", "/projection/all-recipe-summaries/state") => (StatusCode::OK, String::new()),
        ("GET", "/projection/recipe/state") if query == "partition=Recipe-Pancakes" => (
            StatusCode::OK,
            json!({"recipe": {"name": "Pancakes", "overallTime": 15}}).to_string(),
        ),
        ("GET", "/projection/slow/state") => (StatusCode::OK, "[]".to_string()),

        ("GET", "/projections/any") => (
            StatusCode::OK,
            json!({
                "projections": [
                    {"name": "$by_category", "status": "Stopped", "mode": "Continuous"},
                    {"name": "all-recipe-names", "status": "Running", "mode": "Continuous"}
                ]
            })
            .to_string(),
        ),
        ("POST", "/projections/continuous") if query.contains("name=recipe&") => {
            (StatusCode::BAD_REQUEST, "bad definition".to_string())
        }
        ("POST", "/projections/continuous") => (StatusCode::CREATED, String::new()),
        ("POST", "/projection/$by_category/command/enable") => (StatusCode::OK, String::new()),

        _ => (StatusCode::NOT_FOUND, String::new()),
    }
}

async fn serve() -> (FakeStore, SocketAddr) {
    let fake = FakeStore::default();
    let app = Router::new().fallback(handle).with_state(fake.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (fake, addr)
}

async fn client() -> (FakeStore, HttpLogStore) {
    let (fake, addr) = serve().await;
    let store = HttpLogStore::new(LogStoreConfig::new(format!("http://{}", addr))).unwrap();
    (fake, store)
}

fn stream(name: &str) -> StreamName {
    StreamName::for_recipe(&RecipeName::new(name).unwrap())
}

#[tokio::test]
async fn test_append_wire_format() {
    let (fake, store) = client().await;
    let event = EventEnvelope::build(
        RecipeEventType::RecipeAdded,
        json!({"recipe": {"name": "Pancakes"}}),
    );

    store
        .append(&stream("Pancakes"), &event, ExpectedVersion::Any)
        .await
        .unwrap();

    let request = fake.last();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/streams/Recipe-Pancakes");
    assert_eq!(
        request.headers["content-type"],
        "application/vnd.eventstore.events+json"
    );
    assert!(!request.headers.contains_key("ES-ExpectedVersion"));

    let body: Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(
        body,
        json!([{
            "eventId": event.event_id.to_string(),
            "eventType": "RecipeAdded",
            "data": {"recipe": {"name": "Pancakes"}}
        }])
    );
}

#[tokio::test]
async fn test_conditional_append() {
    let (fake, store) = client().await;
    let event = EventEnvelope::build(RecipeEventType::RecipeAdded, json!({}));

    store
        .append(&stream("Fresh"), &event, ExpectedVersion::NoStream)
        .await
        .unwrap();
    assert_eq!(fake.last().headers["ES-ExpectedVersion"], "-1");

    let err = store
        .append(&stream("Taken"), &event, ExpectedVersion::NoStream)
        .await
        .unwrap_err();
    assert!(matches!(err, LogError::WrongExpectedVersion { ref stream } if stream == "Recipe-Taken"));
}

#[tokio::test]
async fn test_append_rejection_carries_status() {
    let (_fake, store) = client().await;
    let event = EventEnvelope::build(RecipeEventType::RecipeCooked, json!({}));

    let err = store
        .append(&stream("Broken"), &event, ExpectedVersion::Any)
        .await
        .unwrap_err();

    match err {
        LogError::StoreRejected { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "disk full");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_projection_reads() {
    let (fake, store) = client().await;

    assert_eq!(
        store.read_projection("all-recipe-names").await.unwrap(),
        json!(["Pancakes"])
    );
    assert!(fake.last().query.is_none());

    assert!(store
        .read_projection("all-recipe-summaries")
        .await
        .unwrap_err()
        .is_not_found());
    assert!(store.read_projection("missing").await.unwrap_err().is_not_found());

    assert_eq!(
        store
            .read_partitioned_projection("recipe", "Recipe-Pancakes")
            .await
            .unwrap(),
        json!({"recipe": {"name": "Pancakes", "overallTime": 15}})
    );
    let request = fake.last();
    assert_eq!(request.path, "/projection/recipe/state");
    assert_eq!(request.query.as_deref(), Some("partition=Recipe-Pancakes"));

    assert!(store
        .read_partitioned_projection("recipe", "Recipe-Ghost")
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_bootstrap_over_http() {
    let (fake, store) = client().await;

    let report = bootstrap(&store, &required_projections()).await;

    assert_eq!(report.skipped(), vec!["all-recipe-names"]);
    assert_eq!(report.created(), vec!["all-recipe-summaries"]);
    assert!(matches!(
        report.projections[2],
        (ref name, ProjectionOutcome::Failed(_)) if name == "recipe"
    ));
    assert!(report.category_index_enabled());

    let requests = fake.requests();
    let creates: Vec<_> = requests
        .iter()
        .filter(|r| r.path == "/projections/continuous")
        .collect();
    assert_eq!(creates.len(), 2);

    let summaries = creates
        .iter()
        .find(|r| r.query.as_deref().unwrap_or("").contains("all-recipe-summaries"))
        .unwrap();
    assert_eq!(
        summaries.query.as_deref(),
        Some("name=all-recipe-summaries&type=js&enabled=true&emit=false&trackemittedstreams=false")
    );
    assert_eq!(summaries.headers["authorization"], ADMIN_AUTH);
    assert!(summaries.body.contains("fromCategory('Recipe')"));

    let enable = requests
        .iter()
        .find(|r| r.path == "/projection/$by_category/command/enable")
        .unwrap();
    assert_eq!(enable.method, Method::POST);
    assert_eq!(enable.headers["authorization"], ADMIN_AUTH);

    let list = requests
        .iter()
        .find(|r| r.path == "/projections/any")
        .unwrap();
    assert_eq!(list.method, Method::GET);
}

#[tokio::test]
async fn test_service_over_http() {
    let (fake, store) = client().await;
    let service = EventSourcedRecipeService::new(store);

    // Listed in all-recipe-names
    let err = service
        .add_recipe(json!({"recipe": {"name": "Pancakes"}}))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
    assert!(fake.requests().iter().all(|r| r.method != Method::POST));

    service
        .add_recipe(json!({"recipe": {"name": "Waffles"}}))
        .await
        .unwrap();
    assert_eq!(fake.last().path, "/streams/Recipe-Waffles");

    // Empty projection body reads as "no state yet"
    assert!(service.list_recipe_summaries().await.unwrap().is_empty());

    assert_eq!(
        service.get_recipe("Pancakes").await.unwrap(),
        json!({"name": "Pancakes", "overallTime": 15})
    );
}

#[tokio::test]
async fn test_timeout_is_transport_failure() {
    let (fake, addr) = serve().await;
    let config = LogStoreConfig::new(format!("http://{}", addr)).with_timeout_secs(1);
    let store = HttpLogStore::new(config).unwrap();

    let err = store.read_projection("slow").await.unwrap_err();

    assert!(matches!(err, LogError::TransportFailure(_)));
    assert_eq!(fake.requests().len(), 1);
}

#[tokio::test]
async fn test_unreachable_store_is_transport_failure() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = HttpLogStore::new(LogStoreConfig::new(format!("http://{}", addr))).unwrap();
    let err = store.list_projections().await.unwrap_err();

    assert!(matches!(err, LogError::TransportFailure(_)));
}
