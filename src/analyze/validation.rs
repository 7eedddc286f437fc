//! Free-text input gate.
//!
//! Three checks, in order: minimum length (after trimming), maximum length,
//! and a small deny-list of promotional patterns. Rejections carry the
//! message shown to the user.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

pub const MIN_CHARS: usize = 10;
pub const MAX_CHARS: usize = 2000;

static PROMO_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(spam|advertisement|buy now|click here)\b",
        r"(?i)\b(viagra|casino|lottery|winner)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid promo regex"))
    .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please provide more details about how you're feeling")]
    TooShort,
    #[error("Please keep your message under 2000 characters")]
    TooLong,
    #[error("Please focus on your mental health concerns")]
    Promotional,
}

impl ValidationError {
    /// Stable label for metrics and logs.
    pub fn kind(self) -> &'static str {
        match self {
            ValidationError::TooShort => "too_short",
            ValidationError::TooLong => "too_long",
            ValidationError::Promotional => "promotional",
        }
    }
}

pub fn validate_user_input(text: &str) -> Result<(), ValidationError> {
    if text.trim().chars().count() < MIN_CHARS {
        return Err(ValidationError::TooShort);
    }
    if text.chars().count() > MAX_CHARS {
        return Err(ValidationError::TooLong);
    }
    if PROMO_PATTERNS.iter().any(|re| re.is_match(text)) {
        return Err(ValidationError::Promotional);
    }
    Ok(())
}

/// Wire shape of `POST /validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<Result<(), ValidationError>> for ValidationOutcome {
    fn from(r: Result<(), ValidationError>) -> Self {
        match r {
            Ok(()) => Self {
                is_valid: true,
                reason: None,
            },
            Err(e) => Self {
                is_valid: false,
                reason: Some(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinary_text_passes() {
        assert_eq!(validate_user_input("sometimes I feel anxious at work"), Ok(()));
    }

    #[test]
    fn short_after_trim_is_rejected() {
        assert_eq!(validate_user_input("   sad    "), Err(ValidationError::TooShort));
        assert_eq!(validate_user_input(""), Err(ValidationError::TooShort));
        // exactly ten characters is enough
        assert_eq!(validate_user_input("0123456789"), Ok(()));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert_eq!(validate_user_input("मुझे चिंता है अब"), Ok(()));
        // 2000 chars but 6000 bytes
        let long = "क".repeat(MAX_CHARS);
        assert_eq!(validate_user_input(&long), Ok(()));
        // astral-plane characters count once each, not as surrogate pairs
        assert_eq!(validate_user_input(&"😔".repeat(1500)), Ok(()));
        let too_long = "a".repeat(MAX_CHARS + 1);
        assert_eq!(validate_user_input(&too_long), Err(ValidationError::TooLong));
    }

    #[test]
    fn promotional_words_are_whole_word_only() {
        assert_eq!(
            validate_user_input("CLICK HERE to feel better today"),
            Err(ValidationError::Promotional)
        );
        assert_eq!(
            validate_user_input("I lost everything at the casino"),
            Err(ValidationError::Promotional)
        );
        // "winners" is not the whole word "winner"
        assert_eq!(validate_user_input("I keep comparing myself to winners"), Ok(()));
    }

    #[test]
    fn outcome_carries_user_message() {
        let o = ValidationOutcome::from(validate_user_input("short"));
        assert!(!o.is_valid);
        assert_eq!(
            o.reason.as_deref(),
            Some("Please provide more details about how you're feeling")
        );
        assert_eq!(ValidationError::Promotional.kind(), "promotional");
    }
}
