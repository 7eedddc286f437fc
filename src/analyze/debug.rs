//! Debug endpoints: inspect the loaded tables and preview a classification
//! without validation or the response delay.
//! Mounted by `api::router` only when DEBUG_ROUTES=1.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::symptoms::{analyze_symptoms, assess_urgency, classify_issue_type};
use crate::classification::{IssueType, SymptomAnalysis, SymptomCategory, Urgency};
use crate::knowledge::KnowledgeHandle;

#[derive(Debug, Serialize)]
pub struct CategoryOut {
    pub name: SymptomCategory,
    pub keywords: usize,
}

#[derive(Debug, Serialize)]
pub struct LexiconOut {
    pub categories: Vec<CategoryOut>,
    pub total_keywords: usize,
    pub crisis_keywords: usize,
    pub severity_tiers: usize,
    pub rules: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PreviewOut {
    pub analysis: SymptomAnalysis,
    pub issue_type: IssueType,
    pub urgency: Urgency,
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub duration: Option<String>,
}

pub fn router(knowledge: KnowledgeHandle) -> Router {
    Router::new()
        .route("/debug/lexicon", get(get_lexicon))
        .route("/debug/analyze_preview", get(get_analyze_preview))
        .with_state(knowledge)
}

async fn get_lexicon(State(kb): State<KnowledgeHandle>) -> Json<LexiconOut> {
    Json(kb.read(|kb| LexiconOut {
        categories: kb
            .lexicon
            .categories
            .iter()
            .map(|c| CategoryOut {
                name: c.name,
                keywords: c.keywords.len(),
            })
            .collect(),
        total_keywords: kb.lexicon.total_keywords(),
        crisis_keywords: kb.lexicon.crisis_keywords.len(),
        severity_tiers: kb.lexicon.severity.len(),
        rules: kb.catalog.rules.iter().map(|r| r.name.clone()).collect(),
    }))
}

/// GET /debug/analyze_preview?text=...&duration=...
async fn get_analyze_preview(
    State(kb): State<KnowledgeHandle>,
    Query(q): Query<PreviewQuery>,
) -> Json<PreviewOut> {
    Json(kb.read(|kb| {
        let analysis = analyze_symptoms(&q.text, &kb.lexicon);
        PreviewOut {
            issue_type: classify_issue_type(&q.text, q.duration.as_deref(), &kb.lexicon),
            urgency: assess_urgency(&analysis),
            analysis,
        }
    }))
}
