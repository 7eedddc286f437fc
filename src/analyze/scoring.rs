//! Structured-answer scoring for the classification questionnaires.
//!
//! Two independent scorers:
//! - `analyze_answers`: five multiple-choice questions, each answer adds fixed
//!   points to a short-term or long-term tally. Short-term wins only on a
//!   strict majority; ties go to long-term.
//! - `analyze_unsure_answers`: three yes/no style questions, each adds 0 or 1
//!   to a long-term tally; long-term at 2 or more.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::classification::IssueType;

pub const Q_DURATION: &str = "duration";
pub const Q_IMPACT: &str = "impact";
pub const Q_EPISODES: &str = "episodes";
pub const Q_SEVERITY: &str = "severity";
pub const Q_SUPPORT: &str = "support";

pub const Q_PATTERN: &str = "pattern";
pub const Q_FIRST_TIME: &str = "first_time";

/// Question id -> selected option value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, String>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, question: &str, option: &str) -> Self {
        self.0.insert(question.to_string(), option.to_string());
        self
    }

    pub fn get(&self, question: &str) -> Option<&str> {
        self.0.get(question).map(String::as_str)
    }
}

/// Question id -> all ticked options (checkbox questions).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnsureAnswers(BTreeMap<String, Vec<String>>);

impl UnsureAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, question: &str, options: &[&str]) -> Self {
        self.0.insert(
            question.to_string(),
            options.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    fn ticked(&self, question: &str, option: &str) -> bool {
        self.0
            .get(question)
            .is_some_and(|v| v.iter().any(|o| o == option))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerScores {
    pub short_term: u32,
    pub long_term: u32,
}

impl AnswerScores {
    /// Strictly greater short-term score wins; ties resolve to long-term.
    pub fn issue_type(&self) -> IssueType {
        if self.short_term > self.long_term {
            IssueType::ShortTerm
        } else {
            IssueType::LongTerm
        }
    }
}

/// Score the five-question classification form.
pub fn analyze_answers(answers: &AnswerSet) -> AnswerScores {
    let mut short_term = 0u32;
    let mut long_term = 0u32;

    match answers.get(Q_DURATION) {
        Some("recent") => short_term += 2,
        Some("weeks") => short_term += 1,
        _ => long_term += 2,
    }

    match answers.get(Q_IMPACT) {
        Some("minimal" | "some") => short_term += 1,
        _ => long_term += 2,
    }

    match answers.get(Q_EPISODES) {
        Some("never" | "rarely") => short_term += 1,
        _ => long_term += 2,
    }

    match answers.get(Q_SEVERITY) {
        Some("crisis") => long_term += 3,
        Some("mild") => short_term += 1,
        _ => {}
    }

    if matches!(answers.get(Q_SUPPORT), Some("none" | "limited")) {
        long_term += 1;
    }

    AnswerScores {
        short_term,
        long_term,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnsureScore {
    pub long_term_tally: u32,
}

impl UnsureScore {
    pub const LONG_TERM_THRESHOLD: u32 = 2;

    pub fn issue_type(&self) -> IssueType {
        if self.long_term_tally >= Self::LONG_TERM_THRESHOLD {
            IssueType::LongTerm
        } else {
            IssueType::ShortTerm
        }
    }

    /// Sentence fragment shown next to the suggested option.
    pub fn reason(&self) -> &'static str {
        match self.issue_type() {
            IssueType::LongTerm => "because this has been affecting you for a while",
            IssueType::ShortTerm => "because this seems to have started recently",
        }
    }
}

/// Score the "not sure" triage: majority vote over three binary questions.
pub fn analyze_unsure_answers(answers: &UnsureAnswers) -> UnsureScore {
    let long_term_tally = [
        answers.ticked(Q_DURATION, "yes"),
        answers.ticked(Q_PATTERN, "constant"),
        answers.ticked(Q_FIRST_TIME, "no"),
    ]
    .into_iter()
    .map(u32::from)
    .sum();

    UnsureScore { long_term_tally }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_short_term_answers() {
        let a = AnswerSet::new()
            .with(Q_DURATION, "recent")
            .with(Q_IMPACT, "minimal")
            .with(Q_EPISODES, "never")
            .with(Q_SEVERITY, "mild")
            .with(Q_SUPPORT, "strong");
        let s = analyze_answers(&a);
        assert_eq!(s, AnswerScores { short_term: 5, long_term: 0 });
        assert_eq!(s.issue_type(), IssueType::ShortTerm);
    }

    #[test]
    fn tie_resolves_to_long_term() {
        // duration missing -> long +2; impact/episodes -> short +1 each.
        let a = AnswerSet::new()
            .with(Q_IMPACT, "minimal")
            .with(Q_EPISODES, "rarely")
            .with(Q_SEVERITY, "moderate")
            .with(Q_SUPPORT, "some");
        let s = analyze_answers(&a);
        assert_eq!(s.short_term, s.long_term);
        assert_eq!(s.issue_type(), IssueType::LongTerm);
    }

    #[test]
    fn crisis_and_isolation_push_long_term() {
        let a = AnswerSet::new()
            .with(Q_DURATION, "recent")
            .with(Q_IMPACT, "some")
            .with(Q_EPISODES, "never")
            .with(Q_SEVERITY, "crisis")
            .with(Q_SUPPORT, "none");
        let s = analyze_answers(&a);
        assert_eq!(s, AnswerScores { short_term: 4, long_term: 4 });
        assert_eq!(s.issue_type(), IssueType::LongTerm);
    }

    #[test]
    fn empty_answers_score_long_term() {
        let s = analyze_answers(&AnswerSet::new());
        assert_eq!(s, AnswerScores { short_term: 0, long_term: 6 });
    }

    #[test]
    fn unsure_majority_vote() {
        let all = UnsureAnswers::new()
            .with(Q_DURATION, &["yes"])
            .with(Q_PATTERN, &["constant"])
            .with(Q_FIRST_TIME, &["no"]);
        let s = analyze_unsure_answers(&all);
        assert_eq!(s.long_term_tally, 3);
        assert_eq!(s.issue_type(), IssueType::LongTerm);

        let one = UnsureAnswers::new()
            .with(Q_DURATION, &["yes"])
            .with(Q_PATTERN, &["comeandgo"])
            .with(Q_FIRST_TIME, &["yes"]);
        let s = analyze_unsure_answers(&one);
        assert_eq!(s.long_term_tally, 1);
        assert_eq!(s.issue_type(), IssueType::ShortTerm);
        assert!(s.reason().contains("started recently"));
    }

    #[test]
    fn unsure_accepts_multiple_ticks() {
        let a = UnsureAnswers::new()
            .with(Q_DURATION, &["no", "yes"])
            .with(Q_PATTERN, &["comeandgo", "constant"]);
        assert_eq!(analyze_unsure_answers(&a).issue_type(), IssueType::LongTerm);
    }

    #[test]
    fn answer_set_deserializes_from_flat_map() {
        let a: AnswerSet =
            serde_json::from_str(r#"{"duration":"weeks","support":"limited"}"#).unwrap();
        assert_eq!(a.get(Q_DURATION), Some("weeks"));
        assert_eq!(a.get(Q_IMPACT), None);
    }
}
