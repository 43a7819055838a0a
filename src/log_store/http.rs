// Copyright (c) 2025 - Cowboy AI, Inc.
//! EventStore HTTP Log Store
//!
//! Implements [`LogStore`] against the EventStore HTTP API:
//!
//! ```text
//! append                       POST {base}/streams/{stream}
//! read_projection              GET  {base}/projection/{name}/state
//! read_partitioned_projection  GET  {base}/projection/{name}/state?partition={p}
//! list_projections             GET  {base}/projections/any
//! create_projection            POST {base}/projections/continuous?name={n}&type=js&...
//! enable_system_category_index POST {base}/projection/$by_category/command/enable
//! ```
//!
//! Projection management calls carry Basic admin credentials. The client
//! timeout from [`LogStoreConfig`] bounds every request; expiry surfaces as
//! `TransportFailure`.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{debug, info};

use super::{ExpectedVersion, LogStore};
use crate::config::LogStoreConfig;
use crate::errors::{LogError, LogResult};
use crate::events::EventEnvelope;
use crate::streams::StreamName;

/// Media type for event batches
pub const EVENTS_CONTENT_TYPE: &str = "application/vnd.eventstore.events+json";

/// Header carrying the append precondition
pub const EXPECTED_VERSION_HEADER: &str = "ES-ExpectedVersion";

/// Response of `GET /projections/any`
#[derive(Debug, Deserialize)]
struct ProjectionList {
    #[serde(default)]
    projections: Vec<ProjectionSummary>,
}

#[derive(Debug, Deserialize)]
struct ProjectionSummary {
    name: String,
}

/// Log Store client over the EventStore HTTP API
#[derive(Debug, Clone)]
pub struct HttpLogStore {
    config: LogStoreConfig,
    client: Client,
}

impl HttpLogStore {
    /// Create a client for the configured store
    pub fn new(config: LogStoreConfig) -> LogResult<Self> {
        info!("Using log store at {}", config.base());

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                LogError::TransportFailure(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &LogStoreConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base(), path)
    }

    fn with_admin(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.basic_auth(&self.config.admin_user, Some(&self.config.admin_password))
    }

    async fn read_state(&self, request: reqwest::RequestBuilder) -> LogResult<Value> {
        let response = check_status(request.send().await?).await?;
        let body = response.text().await?;

        // A projection that exists but has not produced output answers with an empty body
        if body.trim().is_empty() {
            return Err(LogError::NotFound);
        }

        serde_json::from_str(&body).map_err(|e| {
            LogError::TransportFailure(format!("Malformed projection state: {}", e))
        })
    }
}

/// Map a response status onto the error taxonomy
async fn check_status(response: Response) -> LogResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(LogError::NotFound);
    }

    let message = response.text().await.unwrap_or_default();
    Err(LogError::StoreRejected {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl LogStore for HttpLogStore {
    async fn append(
        &self,
        stream: &StreamName,
        event: &EventEnvelope,
        expected: ExpectedVersion,
    ) -> LogResult<()> {
        let body = serde_json::to_vec(&[event])?;

        let mut request = self
            .client
            .post(self.url(&format!("streams/{}", stream)))
            .header(reqwest::header::CONTENT_TYPE, EVENTS_CONTENT_TYPE)
            .body(body);
        if let Some(version) = expected.header_value() {
            request = request.header(EXPECTED_VERSION_HEADER, version);
        }

        debug!(
            stream = %stream,
            event_type = %event.event_type,
            event_id = %event.event_id,
            "Appending event"
        );

        match check_status(request.send().await?).await {
            Ok(_) => Ok(()),
            Err(LogError::StoreRejected { status: 400, .. })
                if expected != ExpectedVersion::Any =>
            {
                Err(LogError::WrongExpectedVersion {
                    stream: stream.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn read_projection(&self, name: &str) -> LogResult<Value> {
        debug!(projection = name, "Reading projection state");
        let request = self.client.get(self.url(&format!("projection/{}/state", name)));
        self.read_state(request).await
    }

    async fn read_partitioned_projection(
        &self,
        name: &str,
        partition: &str,
    ) -> LogResult<Value> {
        debug!(projection = name, partition, "Reading partitioned projection state");
        let request = self
            .client
            .get(self.url(&format!("projection/{}/state", name)))
            .query(&[("partition", partition)]);
        self.read_state(request).await
    }

    async fn list_projections(&self) -> LogResult<BTreeSet<String>> {
        let request = self.with_admin(self.client.get(self.url("projections/any")));
        let response = check_status(request.send().await?).await?;
        let list: ProjectionList = response.json().await?;

        Ok(list.projections.into_iter().map(|p| p.name).collect())
    }

    async fn create_projection(&self, name: &str, source: &str) -> LogResult<()> {
        let request = self
            .with_admin(self.client.post(self.url("projections/continuous")))
            .query(&[
                ("name", name),
                ("type", "js"),
                ("enabled", "true"),
                ("emit", "false"),
                ("trackemittedstreams", "false"),
            ])
            .body(source.to_string());

        check_status(request.send().await?).await?;
        info!(projection = name, "Created continuous projection");
        Ok(())
    }

    async fn enable_system_category_index(&self) -> LogResult<()> {
        let request = self.with_admin(
            self.client
                .post(self.url("projection/$by_category/command/enable")),
        );

        check_status(request.send().await?).await?;
        info!("Enabled $by_category system projection");
        Ok(())
    }
}
