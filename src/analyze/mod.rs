// src/analyze/mod.rs
//! Analysis pipeline entry: free text -> `ClassificationResult`.
//!
//! Order:
//! 1) symptom matcher (categories, severity, triggers, confidence)
//! 2) issue type from the duration answer or duration words
//! 3) urgency decision table
//! 4) catalog recommendations by rule table

pub mod debug;
pub mod rules;
pub mod scoring;
pub mod symptoms;
pub mod validation;

use crate::catalog::{Catalog, CatalogError};
use crate::classification::{ClassificationResult, UserProfile};
use crate::lexicon::Lexicon;

// Re-export convenient types.
pub use crate::analyze::rules::{recommend_practices, short_term_remedies};
pub use crate::analyze::scoring::{
    analyze_answers, analyze_unsure_answers, AnswerScores, AnswerSet, UnsureAnswers, UnsureScore,
};
pub use crate::analyze::symptoms::{analyze_symptoms, assess_urgency, classify_issue_type};
pub use crate::analyze::validation::{validate_user_input, ValidationError, ValidationOutcome};

/// Classify free text and pick matching practices.
///
/// Does not validate; callers gate with `validate_user_input` first.
pub fn classify_and_recommend(
    text: &str,
    duration: Option<&str>,
    profile: Option<&UserProfile>,
    lexicon: &Lexicon,
    catalog: &Catalog,
) -> Result<ClassificationResult, CatalogError> {
    let analysis = analyze_symptoms(text, lexicon);
    let issue_type = classify_issue_type(text, duration, lexicon);
    let urgency = assess_urgency(&analysis);
    let recommendations =
        recommend_practices(&analysis.symptoms, analysis.severity, profile, catalog)?;

    Ok(ClassificationResult {
        issue_type,
        urgency,
        professional_help_needed: ClassificationResult::needs_professional_help(
            issue_type, urgency,
        ),
        primary_concerns: analysis.symptoms,
        recommendations,
        confidence: analysis.confidence,
    })
}
