//! Long-term assessment: questionnaire answers -> urgency, support resources
//! and a daily practice plan.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Cost, PlanEntry, Resource, ResourceKind};
use crate::classification::Severity;

pub const MAX_RESOURCES: usize = 8;
const GENERAL_PLAN: &str = "general";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviousTreatment {
    Never,
    Counseling,
    Medication,
    Both,
    Traditional,
}

impl PreviousTreatment {
    /// Traditional healing or no treatment at all: suggest IKS resources.
    fn wants_iks(self) -> bool {
        matches!(self, PreviousTreatment::Traditional | PreviousTreatment::Never)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongTermAnswers {
    pub primary_concern: String,
    /// Bucket such as `1-3months` or `2+years`.
    pub duration: String,
    pub severity: Severity,
    pub previous_treatment: PreviousTreatment,
    #[serde(default)]
    pub support_system: String,
    #[serde(default)]
    pub cultural_preferences: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentUrgency {
    Standard,
    Moderate,
    High,
    Crisis,
}

impl AssessmentUrgency {
    pub fn from_answers(severity: Severity, duration: &str) -> Self {
        match severity {
            Severity::Crisis => AssessmentUrgency::Crisis,
            Severity::Severe => AssessmentUrgency::High,
            Severity::Moderate if duration.contains("2+") => AssessmentUrgency::Moderate,
            _ => AssessmentUrgency::Standard,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssessmentUrgency::Standard => "standard",
            AssessmentUrgency::Moderate => "moderate",
            AssessmentUrgency::High => "high",
            AssessmentUrgency::Crisis => "crisis",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LongTermAssessment {
    pub urgency: AssessmentUrgency,
    pub primary_concern: String,
    pub severity: Severity,
    pub duration: String,
    pub recommended_resources: Vec<Resource>,
    pub iks_recommendations: Vec<PlanEntry>,
    pub needs_immediate: bool,
}

pub fn assess_long_term(answers: &LongTermAnswers, catalog: &Catalog) -> LongTermAssessment {
    let urgency = AssessmentUrgency::from_answers(answers.severity, &answers.duration);
    LongTermAssessment {
        urgency,
        primary_concern: answers.primary_concern.clone(),
        severity: answers.severity,
        duration: answers.duration.clone(),
        recommended_resources: recommend_resources(urgency, answers.previous_treatment, catalog),
        iks_recommendations: practice_plan(&answers.primary_concern, catalog),
        needs_immediate: urgency == AssessmentUrgency::Crisis,
    }
}

/// Crisis lines first (crisis only), then free NGOs, professionals (high and
/// crisis), paid NGOs, and IKS centres for traditional/untreated users.
pub fn recommend_resources(
    urgency: AssessmentUrgency,
    treatment: PreviousTreatment,
    catalog: &Catalog,
) -> Vec<Resource> {
    let all = &catalog.resources;
    let mut picked: Vec<&Resource> = Vec::new();

    if urgency == AssessmentUrgency::Crisis {
        picked.extend(all.iter().filter(|r| r.kind == ResourceKind::Crisis));
    }
    picked.extend(
        all.iter()
            .filter(|r| r.kind == ResourceKind::Ngo && r.cost == Cost::Free),
    );
    if urgency >= AssessmentUrgency::High {
        picked.extend(all.iter().filter(|r| r.kind == ResourceKind::Professional));
    }
    picked.extend(
        all.iter()
            .filter(|r| r.kind == ResourceKind::Ngo && r.cost != Cost::Free),
    );
    if treatment.wants_iks() {
        picked.extend(all.iter().filter(|r| r.kind == ResourceKind::Iks));
    }

    let mut out: Vec<Resource> = Vec::with_capacity(MAX_RESOURCES);
    for r in picked {
        if out.len() == MAX_RESOURCES {
            break;
        }
        if !out.iter().any(|o| o.id == r.id) {
            out.push(r.clone());
        }
    }
    out
}

/// Concern-specific entries followed by the general daily-routine entry.
pub fn practice_plan(concern: &str, catalog: &Catalog) -> Vec<PlanEntry> {
    catalog
        .plans_for(concern)
        .chain(catalog.plans_for(GENERAL_PLAN))
        .cloned()
        .collect()
}
