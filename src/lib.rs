// src/lib.rs
// Public library surface for the binary, integration tests and the demo bin.

pub mod api;
pub mod assessment;
pub mod catalog;
pub mod classification;
pub mod config;
pub mod guidance;
pub mod knowledge;
pub mod lexicon;
pub mod metrics;
pub mod telemetry;

// Free-text pipeline and questionnaire scorers (symptoms, rules, scoring, validation, debug)
pub mod analyze;

use anyhow::Context;
use axum::Router;
use tracing::info;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::classification::{
    ClassificationResult, IssueType, Severity, SymptomAnalysis, SymptomCategory, Urgency,
    UserProfile,
};
pub use crate::config::AppConfig;

use crate::knowledge::{start_hot_reload_thread, KnowledgeBase, KnowledgeHandle};

/// Load tables, start the dev reload watcher and build the full router.
pub fn build_app(config: AppConfig) -> anyhow::Result<Router> {
    let kb = KnowledgeBase::load(config.lexicon_path.as_deref(), config.catalog_path.as_deref())
        .context("loading lexicon and catalog")?;

    info!(
        keywords = kb.lexicon.total_keywords(),
        practices = kb.catalog.practices.len(),
        rules = kb.catalog.rules.len(),
        delay_ms = config.analysis_delay.as_millis() as u64,
        debug_routes = config.debug_routes,
        "knowledge base loaded"
    );

    let handle = KnowledgeHandle::new(kb);
    start_hot_reload_thread(handle.clone(), config.watched_files());

    Ok(router(AppState::new(handle, config)))
}
