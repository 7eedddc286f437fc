//! Wellness triage service — binary entrypoint.
//! Boots the Axum HTTP server on Shuttle with the embedded (or overridden)
//! lexicon and catalog.

use shuttle_axum::ShuttleAxum;
use wellness_analyzer::{build_app, telemetry, AppConfig};

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    telemetry::init_tracing();

    let config = AppConfig::from_env();
    let router = build_app(config)?;

    Ok(router.into())
}
