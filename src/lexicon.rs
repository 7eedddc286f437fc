// src/lexicon.rs
//! Keyword tables for the free-text matcher: symptom categories, crisis
//! phrases, severity tiers, duration indicators and common triggers.
//!
//! The default table is compiled in from `config/lexicon.toml`. A different
//! file can be supplied at runtime through `WELLNESS_LEXICON_PATH`.

use anyhow::{anyhow, Context};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::classification::{Severity, SymptomCategory};

pub const ENV_LEXICON_PATH: &str = "WELLNESS_LEXICON_PATH";

static BUILTIN: Lazy<Lexicon> = Lazy::new(|| {
    let raw = include_str!("../config/lexicon.toml");
    Lexicon::from_toml_str(raw).expect("valid embedded lexicon")
});

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryKeywords {
    pub name: SymptomCategory,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeverityTier {
    pub level: Severity,
    pub indicators: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DurationIndicators {
    #[serde(default)]
    pub short_term: Vec<String>,
    #[serde(default)]
    pub long_term: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Lexicon {
    pub crisis_keywords: Vec<String>,
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub duration: DurationIndicators,
    pub categories: Vec<CategoryKeywords>,
    /// Scanned in declaration order; a later matching tier overwrites an earlier one.
    pub severity: Vec<SeverityTier>,
}

impl Lexicon {
    /// The compiled-in table.
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    /// Parse and normalize a TOML table (keywords are lower-cased).
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let mut lex: Lexicon = toml::from_str(toml_str).context("parsing lexicon TOML")?;
        lex.normalize();
        lex.check()?;
        Ok(lex)
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading lexicon from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// `$WELLNESS_LEXICON_PATH` if set, otherwise the compiled-in table.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var(ENV_LEXICON_PATH) {
            Ok(p) if !p.trim().is_empty() => Self::from_path(&PathBuf::from(p)),
            _ => Ok(Self::builtin().clone()),
        }
    }

    /// Total keyword count across all categories, duplicates included.
    pub fn total_keywords(&self) -> usize {
        self.categories.iter().map(|c| c.keywords.len()).sum()
    }

    pub fn keywords_for(&self, category: SymptomCategory) -> &[String] {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.keywords.as_slice())
            .unwrap_or(&[])
    }

    fn normalize(&mut self) {
        fn lower_all(v: &mut Vec<String>) {
            for s in v.iter_mut() {
                *s = s.trim().to_lowercase();
            }
            v.retain(|s| !s.is_empty());
        }
        lower_all(&mut self.crisis_keywords);
        lower_all(&mut self.triggers);
        lower_all(&mut self.duration.short_term);
        lower_all(&mut self.duration.long_term);
        for c in &mut self.categories {
            lower_all(&mut c.keywords);
        }
        for t in &mut self.severity {
            lower_all(&mut t.indicators);
        }
    }

    fn check(&self) -> anyhow::Result<()> {
        for (i, c) in self.categories.iter().enumerate() {
            if self.categories[..i].iter().any(|o| o.name == c.name) {
                return Err(anyhow!("lexicon category `{}` declared twice", c.name));
            }
            if c.keywords.is_empty() {
                return Err(anyhow!("lexicon category `{}` has no keywords", c.name));
            }
        }
        if self.total_keywords() == 0 {
            return Err(anyhow!("lexicon has no category keywords"));
        }
        Ok(())
    }
}

/// True if any phrase occurs in the (already lower-cased) text.
pub(crate) fn contains_any(lower_text: &str, phrases: &[String]) -> bool {
    phrases.iter().any(|p| lower_text.contains(p.as_str()))
}

/// All phrases occurring in the (already lower-cased) text, in table order.
pub(crate) fn matching<'a>(lower_text: &str, phrases: &'a [String]) -> Vec<&'a str> {
    phrases
        .iter()
        .filter(|p| lower_text.contains(p.as_str()))
        .map(String::as_str)
        .collect()
}
