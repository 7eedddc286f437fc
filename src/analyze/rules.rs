//! Recommendation rules: symptom categories + severity -> catalog practices.
//!
//! The rule table lives in `config/catalog.toml`:
//! - `when.any_symptom`: match if ANY listed category was detected (empty = always)
//! - `when.severity_in`: match if severity is one of the listed levels (empty = any)
//! - `practices`:        ids appended, in order, when the rule matches
//!
//! Rules are applied top to bottom. Beginners get the collected list filtered
//! to beginner practices and cut to 4, repeats included. Everyone else gets it
//! deduplicated by id (first occurrence wins) and cut to 5.

use crate::catalog::{Catalog, CatalogError, Difficulty, Practice, When};
use crate::classification::{Severity, SymptomCategory, UserProfile};

pub const MAX_RECOMMENDATIONS: usize = 5;
pub const MAX_BEGINNER_RECOMMENDATIONS: usize = 4;

/// Select catalog practices for the detected symptoms.
pub fn recommend_practices(
    symptoms: &[SymptomCategory],
    severity: Severity,
    profile: Option<&UserProfile>,
    catalog: &Catalog,
) -> Result<Vec<Practice>, CatalogError> {
    let mut picked: Vec<&Practice> = Vec::new();

    for rule in &catalog.rules {
        if !matches_when(symptoms, severity, &rule.when) {
            continue;
        }
        for id in &rule.practices {
            let p = catalog
                .practice(id)
                .map_err(|_| CatalogError::MissingPractice {
                    id: id.clone(),
                    referenced_by: format!("rule `{}`", rule.name),
                })?;
            picked.push(p);
        }
    }

    let selected: Vec<&Practice> = if profile.is_some_and(UserProfile::is_beginner) {
        picked
            .into_iter()
            .filter(|p| p.difficulty == Difficulty::Beginner)
            .take(MAX_BEGINNER_RECOMMENDATIONS)
            .collect()
    } else {
        let mut unique = Vec::with_capacity(picked.len());
        for p in picked {
            push_unique(&mut unique, p);
        }
        unique.truncate(MAX_RECOMMENDATIONS);
        unique
    };

    Ok(selected.into_iter().cloned().collect())
}

/// Map selected practices onto the short-term flow's quick-relief remedies.
///
/// Each practice category with a remap entry contributes its remedy; anxiety
/// adds the grounding remedy; the list is topped up from the remedy catalog
/// to the configured minimum and cut to the configured limit.
pub fn short_term_remedies(
    recommendations: &[Practice],
    concerns: &[SymptomCategory],
    catalog: &Catalog,
) -> Result<Vec<Practice>, CatalogError> {
    let cfg = &catalog.short_term;
    let mut out: Vec<&Practice> = Vec::new();

    for rec in recommendations {
        if let Some(id) = cfg.remap.get(&rec.category) {
            push_unique(&mut out, catalog.remedy(id)?);
        }
    }

    if concerns.contains(&SymptomCategory::Anxiety) {
        if let Some(id) = &cfg.anxiety_remedy {
            push_unique(&mut out, catalog.remedy(id)?);
        }
    }

    for r in &catalog.remedies {
        if out.len() >= cfg.minimum {
            break;
        }
        push_unique(&mut out, r);
    }

    out.truncate(cfg.limit);
    Ok(out.into_iter().cloned().collect())
}

// --- internals ---

fn matches_when(symptoms: &[SymptomCategory], severity: Severity, w: &When) -> bool {
    if !w.severity_in.is_empty() && !w.severity_in.contains(&severity) {
        return false;
    }
    if !w.any_symptom.is_empty() && !w.any_symptom.iter().any(|c| symptoms.contains(c)) {
        return false;
    }
    true
}

fn push_unique<'a>(list: &mut Vec<&'a Practice>, p: &'a Practice) {
    if !list.iter().any(|q| q.id == p.id) {
        list.push(p);
    }
}
