use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::analyze::{
    self, analyze_answers, analyze_unsure_answers, short_term_remedies, validate_user_input,
    AnswerSet, UnsureAnswers, ValidationError, ValidationOutcome,
};
use crate::assessment::{assess_long_term, LongTermAnswers, LongTermAssessment};
use crate::catalog::{CatalogError, Practice, Resource};
use crate::classification::{ClassificationResult, IssueType, UserProfile, Urgency};
use crate::config::AppConfig;
use crate::guidance::{self, AnalysisContext, AnalysisResponse, FormattedPractice};
use crate::knowledge::KnowledgeHandle;
use crate::metrics::{self as wellness_metrics, Metrics};
use crate::telemetry::{anon_hash, dev_logging_enabled};

#[derive(Clone)]
pub struct AppState {
    pub knowledge: KnowledgeHandle,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(knowledge: KnowledgeHandle, config: AppConfig) -> Self {
        Self {
            knowledge,
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let metrics = Metrics::init();
    let debug_routes = state.config.debug_routes;
    let knowledge = state.knowledge.clone();

    let mut app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/analyze", post(analyze_text))
        .route("/validate", post(validate_text))
        .route("/classify", post(classify_answers))
        .route("/classify/unsure", post(classify_unsure))
        .route("/short-term", post(short_term))
        .route("/assessment", post(long_term_assessment))
        .route("/practices", get(list_practices))
        .with_state(state)
        .merge(metrics.router());

    if debug_routes {
        app = app.merge(analyze::debug::router(knowledge));
    }

    app.layer(CorsLayer::very_permissive())
}

/* ----------------------------
Errors
---------------------------- */

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(e) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "invalid_input", "reason": e.to_string() })),
            )
                .into_response(),
            ApiError::Catalog(e) => {
                warn!(error = %e, "catalog lookup failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "catalog", "reason": e.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

/* ----------------------------
Free-text analysis
---------------------------- */

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub user_profile: Option<UserProfile>,
    #[serde(default)]
    pub context: Option<AnalysisContext>,
}

#[derive(Debug, Serialize)]
pub struct ShortTermResponse {
    #[serde(flatten)]
    pub analysis: AnalysisResponse,
    /// Quick-relief remedies mapped from the recommendations.
    pub remedies: Vec<FormattedPractice>,
}

/// Validate, classify and record one submission. Shared by `/analyze` and
/// `/short-term`.
fn classify_request(state: &AppState, req: &AnalyzeRequest) -> Result<ClassificationResult, ApiError> {
    let id = anon_hash(&req.text);

    if let Err(e) = validate_user_input(&req.text) {
        wellness_metrics::record_rejection(e.kind());
        info!(%id, reason = e.kind(), "input rejected");
        return Err(e.into());
    }

    let started = Instant::now();
    let result = state.knowledge.read(|kb| {
        analyze::classify_and_recommend(
            &req.text,
            req.duration.as_deref(),
            req.user_profile.as_ref(),
            &kb.lexicon,
            &kb.catalog,
        )
    })?;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    wellness_metrics::record_analysis(result.urgency, result.issue_type, elapsed_ms);

    if result.urgency == Urgency::Crisis {
        warn!(%id, issue_type = %result.issue_type, "crisis indicators detected");
    } else {
        info!(
            %id,
            urgency = %result.urgency,
            issue_type = %result.issue_type,
            concerns = ?result.primary_concerns,
            "analysis complete"
        );
    }

    if dev_logging_enabled() {
        let recs: Vec<&str> = result.recommendations.iter().map(|p| p.id.as_str()).collect();
        info!(
            target: "wellness_analyzer::dev",
            %id,
            context = ?req.context,
            confidence = result.confidence,
            professional_help = result.professional_help_needed,
            recommendations = ?recs,
            elapsed_ms
        );
    }

    Ok(result)
}

async fn analyze_text(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let classification = classify_request(&state, &req)?;
    tokio::time::sleep(state.config.analysis_delay).await;
    Ok(Json(guidance::build_response(
        classification,
        req.user_profile.as_ref(),
    )))
}

async fn short_term(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<ShortTermResponse>, ApiError> {
    let classification = classify_request(&state, &req)?;
    let remedies = state.knowledge.read(|kb| {
        short_term_remedies(
            &classification.recommendations,
            &classification.primary_concerns,
            &kb.catalog,
        )
    })?;
    tokio::time::sleep(state.config.analysis_delay).await;

    let profile = req.user_profile.as_ref();
    Ok(Json(ShortTermResponse {
        remedies: guidance::format_practices(&remedies, profile),
        analysis: guidance::build_response(classification, profile),
    }))
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub text: String,
}

async fn validate_text(Json(req): Json<ValidateRequest>) -> Json<ValidationOutcome> {
    Json(validate_user_input(&req.text).into())
}

/* ----------------------------
Structured questionnaires
---------------------------- */

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub issue_type: IssueType,
    pub short_term_score: u32,
    pub long_term_score: u32,
}

async fn classify_answers(Json(answers): Json<AnswerSet>) -> Json<ClassifyResponse> {
    let scores = analyze_answers(&answers);
    Json(ClassifyResponse {
        issue_type: scores.issue_type(),
        short_term_score: scores.short_term,
        long_term_score: scores.long_term,
    })
}

#[derive(Debug, Serialize)]
pub struct UnsureResponse {
    pub issue_type: IssueType,
    pub long_term_tally: u32,
    pub reason: &'static str,
}

async fn classify_unsure(Json(answers): Json<UnsureAnswers>) -> Json<UnsureResponse> {
    let score = analyze_unsure_answers(&answers);
    Json(UnsureResponse {
        issue_type: score.issue_type(),
        long_term_tally: score.long_term_tally,
        reason: score.reason(),
    })
}

async fn long_term_assessment(
    State(state): State<AppState>,
    Json(answers): Json<LongTermAnswers>,
) -> Json<LongTermAssessment> {
    let assessment = state
        .knowledge
        .read(|kb| assess_long_term(&answers, &kb.catalog));

    if assessment.needs_immediate {
        warn!(concern = %assessment.primary_concern, "assessment flagged for immediate support");
    } else {
        info!(
            urgency = assessment.urgency.as_str(),
            concern = %assessment.primary_concern,
            resources = assessment.recommended_resources.len(),
            "assessment complete"
        );
    }
    Json(assessment)
}

/* ----------------------------
Catalog
---------------------------- */

#[derive(Debug, Serialize)]
pub struct PracticesResponse {
    pub practices: Vec<Practice>,
    pub remedies: Vec<Practice>,
    pub resources: Vec<Resource>,
}

async fn list_practices(State(state): State<AppState>) -> Json<PracticesResponse> {
    Json(state.knowledge.read(|kb| PracticesResponse {
        practices: kb.catalog.practices.clone(),
        remedies: kb.catalog.remedies.clone(),
        resources: kb.catalog.resources.clone(),
    }))
}
