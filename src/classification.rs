//! classification.rs — shared result types for both scoring pipelines.
//!
//! Everything here is plain data: produced once per analysis call, serialized
//! to the UI, never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::Practice;

/// Short-term vs long-term concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueType {
    ShortTerm,
    LongTerm,
}

impl IssueType {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueType::ShortTerm => "short-term",
            IssueType::LongTerm => "long-term",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity derived from free text. Ordered: mild < moderate < severe < crisis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
    Crisis,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
            Severity::Crisis => "crisis",
        }
    }
}

/// Ordinal urgency driving next-step messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Crisis,
}

impl Urgency {
    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Crisis => "crisis",
        }
    }

    /// Crisis and high urgency both warrant immediate escalation.
    pub fn is_escalated(self) -> bool {
        matches!(self, Urgency::Crisis | Urgency::High)
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The seven keyword categories of the symptom matcher, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymptomCategory {
    Anxiety,
    Depression,
    Stress,
    Sleep,
    Physical,
    Cognitive,
    Social,
}

impl SymptomCategory {
    pub const ALL: [SymptomCategory; 7] = [
        SymptomCategory::Anxiety,
        SymptomCategory::Depression,
        SymptomCategory::Stress,
        SymptomCategory::Sleep,
        SymptomCategory::Physical,
        SymptomCategory::Cognitive,
        SymptomCategory::Social,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SymptomCategory::Anxiety => "anxiety",
            SymptomCategory::Depression => "depression",
            SymptomCategory::Stress => "stress",
            SymptomCategory::Sleep => "sleep",
            SymptomCategory::Physical => "physical",
            SymptomCategory::Cognitive => "cognitive",
            SymptomCategory::Social => "social",
        }
    }

    /// Categories that also describe the emotional state.
    pub fn is_emotional(self) -> bool {
        matches!(
            self,
            SymptomCategory::Anxiety | SymptomCategory::Depression | SymptomCategory::Stress
        )
    }

    /// Label shown on result cards.
    pub fn display_name(self) -> &'static str {
        match self {
            SymptomCategory::Anxiety => "Anxiety",
            SymptomCategory::Depression => "Depression",
            SymptomCategory::Stress => "Stress",
            SymptomCategory::Sleep => "Sleep Issues",
            SymptomCategory::Physical => "Physical Symptoms",
            SymptomCategory::Cognitive => "Concentration Issues",
            SymptomCategory::Social => "Social Concerns",
        }
    }
}

impl fmt::Display for SymptomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Optional profile sent alongside free text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub experience: Option<ExperienceLevel>,
    #[serde(default)]
    pub cultural_preferences: Vec<String>,
    #[serde(default)]
    pub previous_treatment: Option<String>,
}

impl UserProfile {
    pub fn is_beginner(&self) -> bool {
        self.experience == Some(ExperienceLevel::Beginner)
    }
}

/// Output of the free-text symptom matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomAnalysis {
    /// Matched categories, in declaration order.
    pub symptoms: Vec<SymptomCategory>,
    pub severity: Severity,
    pub emotional_state: Vec<SymptomCategory>,
    pub triggers: Vec<String>,
    /// Literal physical keywords found in the text.
    pub physical_symptoms: Vec<String>,
    /// Opaque score in [0, 95].
    pub confidence: f32,
}

impl SymptomAnalysis {
    pub fn has(&self, category: SymptomCategory) -> bool {
        self.symptoms.contains(&category)
    }
}

/// Full classification of one free-text submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub urgency: Urgency,
    pub primary_concerns: Vec<SymptomCategory>,
    #[serde(default)]
    pub recommendations: Vec<Practice>,
    pub professional_help_needed: bool,
    pub confidence: f32,
}

impl ClassificationResult {
    /// Professional help is needed for crisis/high urgency, or for medium
    /// urgency on a long-term concern.
    pub fn needs_professional_help(issue_type: IssueType, urgency: Urgency) -> bool {
        urgency.is_escalated() || (urgency == Urgency::Medium && issue_type == IssueType::LongTerm)
    }
}
