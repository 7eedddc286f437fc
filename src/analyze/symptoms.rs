//! Free-text symptom matcher.
//!
//! Plain case-insensitive substring containment against the lexicon tables.
//! No tokenization: "network" matches the trigger "work", "headache" matches
//! both "headache" and "ache".

use crate::classification::{IssueType, Severity, SymptomAnalysis, SymptomCategory, Urgency};
use crate::lexicon::{contains_any, matching, Lexicon};

const MAX_CONFIDENCE: f32 = 95.0;

/// Extract matched categories, severity, triggers and physical keywords.
pub fn analyze_symptoms(text: &str, lexicon: &Lexicon) -> SymptomAnalysis {
    let lower = text.to_lowercase();

    let has_crisis = contains_any(&lower, &lexicon.crisis_keywords);

    let mut symptoms = Vec::new();
    let mut emotional_state = Vec::new();
    let mut physical_symptoms = Vec::new();

    for cat in &lexicon.categories {
        let hits = matching(&lower, &cat.keywords);
        if hits.is_empty() {
            continue;
        }
        symptoms.push(cat.name);
        if cat.name.is_emotional() {
            emotional_state.push(cat.name);
        }
        if cat.name == SymptomCategory::Physical {
            physical_symptoms.extend(hits.into_iter().map(str::to_string));
        }
    }

    let severity = if has_crisis {
        Severity::Crisis
    } else {
        scan_severity(&lower, lexicon)
    };

    let triggers = matching(&lower, &lexicon.triggers)
        .into_iter()
        .map(str::to_string)
        .collect();

    let confidence = confidence(symptoms.len(), lexicon.total_keywords());

    SymptomAnalysis {
        symptoms,
        severity,
        emotional_state,
        triggers,
        physical_symptoms,
        confidence,
    }
}

/// Walk the tiers in declaration order; every matching tier overwrites the
/// previous result, so the last declared match wins.
fn scan_severity(lower: &str, lexicon: &Lexicon) -> Severity {
    let mut severity = Severity::Mild;
    for tier in &lexicon.severity {
        if contains_any(lower, &tier.indicators) {
            severity = tier.level;
        }
    }
    severity
}

fn confidence(matched_categories: usize, total_keywords: usize) -> f32 {
    if total_keywords == 0 {
        return 0.0;
    }
    let raw = matched_categories as f32 / total_keywords as f32 * 100.0;
    raw.clamp(0.0, MAX_CONFIDENCE)
}

/// Short-term vs long-term from an explicit duration answer or, failing that,
/// duration words in the text. Defaults to short-term.
pub fn classify_issue_type(text: &str, duration: Option<&str>, lexicon: &Lexicon) -> IssueType {
    let lower = text.to_lowercase();

    if let Some(d) = duration.filter(|d| !d.is_empty()) {
        if d.contains("recent") || d.contains("weeks") {
            return IssueType::ShortTerm;
        }
        if d.contains("months") || d.contains("years") {
            return IssueType::LongTerm;
        }
    }

    let short = contains_any(&lower, &lexicon.duration.short_term);
    let long = contains_any(&lower, &lexicon.duration.long_term);

    if long && !short {
        IssueType::LongTerm
    } else {
        IssueType::ShortTerm
    }
}

/// Fixed decision table from severity (and anxiety/depression presence).
pub fn assess_urgency(analysis: &SymptomAnalysis) -> Urgency {
    match analysis.severity {
        Severity::Crisis => Urgency::Crisis,
        Severity::Severe => Urgency::High,
        Severity::Moderate
            if analysis.has(SymptomCategory::Anxiety) || analysis.has(SymptomCategory::Depression) =>
        {
            Urgency::Medium
        }
        _ => Urgency::Low,
    }
}
