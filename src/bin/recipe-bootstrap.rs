// Copyright (c) 2025 - Cowboy AI, Inc.
//! Recipe Projection Bootstrap
//!
//! Registers the recipe catalog's continuous projections with the Log Store
//! and enables the `$by_category` index they read from.
//!
//! Run with: cargo run --bin recipe-bootstrap
//!
//! Environment:
//! - `EVENTSTORE_URL` (default: http://localhost:2113)
//! - `EVENTSTORE_ADMIN_USER` / `EVENTSTORE_ADMIN_PASSWORD` (default: admin / changeit)
//! - `EVENTSTORE_TIMEOUT_SECS` (default: 30)
//!
//! Failures to register individual projections are logged and reported but
//! do not change the exit code; only invalid configuration does.

use anyhow::{Context, Result};
use recipe_catalog::{bootstrap, required_projections, HttpLogStore, LogStoreConfig};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("🚀 Starting recipe projection bootstrap");

    let config = LogStoreConfig::from_env().context("Invalid Log Store configuration")?;
    info!(
        base_url = %config.base_url,
        timeout_secs = config.timeout_secs,
        "📋 Configuration loaded"
    );

    let store = HttpLogStore::new(config).context("Failed to create Log Store client")?;

    let required = required_projections();
    info!(count = required.len(), "🔧 Ensuring projections");

    let report = bootstrap(&store, &required).await;

    for (name, outcome) in &report.projections {
        info!(projection = %name, outcome = ?outcome, "📊 Projection");
    }

    if report.is_complete() {
        info!("✅ Bootstrap complete");
    } else {
        warn!(%report, "⚠️ Bootstrap incomplete; projections may be unavailable");
    }

    Ok(())
}
