//! # Response Assembly
//! Pure mapping `ClassificationResult` -> human-facing guidance: bilingual
//! message, next steps, time-to-relief estimate, follow-up flag and
//! culturally formatted practice cards. No I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Practice, PracticeCategory};
use crate::classification::{ClassificationResult, IssueType, UserProfile, Urgency};

pub const CRISIS_HELPLINE: &str = "1800-599-0019";

/// Follow-up is suggested below this confidence.
pub const FOLLOW_UP_CONFIDENCE: f32 = 70.0;

const OLDER_ADULT_AGE: u32 = 60;
const BEGINNER_SUFFIX: &str = " (Take your time, no rush)";

/// Where the submission came from in the UI flow. Carried for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisContext {
    Initial,
    FollowUp,
    Crisis,
}

/// A catalog practice plus the per-user presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedPractice {
    #[serde(flatten)]
    pub practice: Practice,
    pub cultural_context: &'static str,
    pub adapted_instructions: Vec<String>,
}

/// Final response returned by `POST /analyze`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub classification: ClassificationResult,
    /// Card labels for `classification.primary_concerns`, same order.
    pub primary_concern_labels: Vec<&'static str>,
    pub cultural_message: &'static str,
    pub next_steps: Vec<String>,
    pub estimated_time_to_relief: &'static str,
    pub follow_up_recommended: bool,
    pub practices: Vec<FormattedPractice>,
    pub generated_at: DateTime<Utc>,
}

pub fn build_response(
    classification: ClassificationResult,
    profile: Option<&UserProfile>,
) -> AnalysisResponse {
    let practices = format_practices(&classification.recommendations, profile);
    AnalysisResponse {
        primary_concern_labels: classification
            .primary_concerns
            .iter()
            .map(|c| c.display_name())
            .collect(),
        cultural_message: cultural_message(&classification),
        next_steps: next_steps(&classification),
        estimated_time_to_relief: estimate_time_to_relief(&classification),
        follow_up_recommended: should_follow_up(&classification),
        practices,
        classification,
        generated_at: Utc::now(),
    }
}

pub fn cultural_message(c: &ClassificationResult) -> &'static str {
    if c.urgency == Urgency::Crisis {
        "आपकी स्थिति को देखते हुए, तुरंत सहायता लेना आवश्यक है। कृपया हेल्पलाइन पर संपर्क करें। / Given your situation, immediate support is essential. Please contact the helpline."
    } else if c.issue_type == IssueType::LongTerm {
        "दीर्घकालिक कल्याण के लिए पारंपरिक और आधुनिक दोनों दृष्टिकोणों का संयोजन सबसे प्रभावी है। / For long-term wellness, combining traditional and modern approaches is most effective."
    } else {
        "तत्काल राहत के लिए ये प्राचीन भारतीय प्रथाएं सहायक हो सकती हैं। / These ancient Indian practices can be helpful for immediate relief."
    }
}

pub fn next_steps(c: &ClassificationResult) -> Vec<String> {
    if c.urgency == Urgency::Crisis {
        return vec![
            format!("Contact crisis helpline immediately: {CRISIS_HELPLINE}"),
            "Reach out to a trusted friend or family member".to_string(),
            "Consider visiting nearest emergency room if in immediate danger".to_string(),
        ];
    }

    let mut steps: Vec<&str> = Vec::with_capacity(6);
    if c.professional_help_needed {
        steps.push("Schedule appointment with mental health professional");
        steps.push("Consider counseling or therapy services");
    }

    match c.issue_type {
        IssueType::ShortTerm => steps.extend([
            "Try the recommended breathing exercises immediately",
            "Practice for 10-15 minutes, 2-3 times today",
            "Monitor how you feel after each practice",
            "Return if symptoms persist beyond 48 hours",
        ]),
        IssueType::LongTerm => steps.extend([
            "Begin with beginner-level practices",
            "Establish a daily routine incorporating these techniques",
            "Consider consulting an Ayurvedic practitioner",
            "Track your progress over the next 2-4 weeks",
        ]),
    }

    steps.into_iter().map(str::to_string).collect()
}

pub fn estimate_time_to_relief(c: &ClassificationResult) -> &'static str {
    match (c.urgency, c.issue_type) {
        (Urgency::Crisis, _) => "Immediate professional intervention needed",
        (Urgency::Low, IssueType::ShortTerm) => "15-30 minutes with breathing exercises",
        (_, IssueType::ShortTerm) => "1-3 hours with combined practices",
        (Urgency::High, IssueType::LongTerm) => {
            "1-2 weeks with consistent practice + professional help"
        }
        (_, IssueType::LongTerm) => "2-4 weeks with regular practice",
    }
}

pub fn should_follow_up(c: &ClassificationResult) -> bool {
    c.urgency.is_escalated()
        || c.issue_type == IssueType::LongTerm
        || c.confidence < FOLLOW_UP_CONFIDENCE
}

pub fn cultural_context(category: PracticeCategory) -> &'static str {
    match category {
        PracticeCategory::Pranayama => {
            "प्राणायाम - Ancient breathing practices from yoga tradition for mental balance"
        }
        PracticeCategory::Yoga => {
            "योग - Physical postures that unite body and mind for holistic wellness"
        }
        PracticeCategory::Ayurveda => {
            "आयुर्वेद - Traditional Indian medicine focusing on natural healing"
        }
        PracticeCategory::Meditation => {
            "ध्यान - Contemplative practices for inner peace and mental clarity"
        }
        PracticeCategory::Lifestyle => "जीवनशैली - Daily routines aligned with natural rhythms",
        _ => "Traditional wellness practice",
    }
}

/// Age takes precedence over experience; only one adaptation is applied.
pub fn adapt_instructions(instructions: &[String], profile: Option<&UserProfile>) -> Vec<String> {
    let Some(p) = profile else {
        return instructions.to_vec();
    };

    if p.age.is_some_and(|a| a > OLDER_ADULT_AGE) {
        return instructions
            .iter()
            .map(|i| {
                i.replacen("Hold for", "Hold gently for", 1)
                    .replacen("Deep breath", "Comfortable breath", 1)
            })
            .collect();
    }

    if p.is_beginner() {
        return instructions
            .iter()
            .map(|i| format!("{i}{BEGINNER_SUFFIX}"))
            .collect();
    }

    instructions.to_vec()
}

pub fn format_practices(
    practices: &[Practice],
    profile: Option<&UserProfile>,
) -> Vec<FormattedPractice> {
    practices
        .iter()
        .map(|p| FormattedPractice {
            cultural_context: cultural_context(p.category),
            adapted_instructions: adapt_instructions(&p.instructions, profile),
            practice: p.clone(),
        })
        .collect()
}
