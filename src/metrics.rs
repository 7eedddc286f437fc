use axum::{routing::get, Router};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use crate::classification::{IssueType, Urgency};

pub const ANALYSES_TOTAL: &str = "wellness_analyses_total";
pub const VALIDATION_REJECTIONS_TOTAL: &str = "wellness_validation_rejections_total";
pub const CRISIS_DETECTIONS_TOTAL: &str = "wellness_crisis_detections_total";
pub const ANALYSIS_DURATION_MS: &str = "wellness_analysis_duration_ms";

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

#[derive(Clone)]
pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder once per process. Later calls (several
    /// routers in one test binary) share the first handle.
    pub fn init() -> Self {
        let handle = HANDLE
            .get_or_init(|| {
                let handle = PrometheusBuilder::new()
                    .install_recorder()
                    // Someone else owns the global recorder; keep a detached one.
                    .unwrap_or_else(|_| PrometheusBuilder::new().build_recorder().handle());
                describe();
                handle
            })
            .clone();
        Self { handle }
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

fn describe() {
    describe_counter!(ANALYSES_TOTAL, "Free-text analyses by urgency and issue type");
    describe_counter!(VALIDATION_REJECTIONS_TOTAL, "Rejected inputs by reason");
    describe_counter!(CRISIS_DETECTIONS_TOTAL, "Analyses classified as crisis");
    describe_histogram!(ANALYSIS_DURATION_MS, "Classification time, excluding the response delay");
}

pub fn record_analysis(urgency: Urgency, issue_type: IssueType, elapsed_ms: f64) {
    counter!(
        ANALYSES_TOTAL,
        "urgency" => urgency.as_str(),
        "issue_type" => issue_type.as_str()
    )
    .increment(1);
    if urgency == Urgency::Crisis {
        counter!(CRISIS_DETECTIONS_TOTAL).increment(1);
    }
    histogram!(ANALYSIS_DURATION_MS).record(elapsed_ms);
}

pub fn record_rejection(kind: &'static str) {
    counter!(VALIDATION_REJECTIONS_TOTAL, "kind" => kind).increment(1);
}
