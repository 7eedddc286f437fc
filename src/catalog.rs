// src/catalog.rs
//! Static recommendation catalog: IKS practices, quick-relief remedies, the
//! recommendation rule table, long-term plan entries and the helpline
//! directory.
//!
//! Loaded from `config/catalog.toml` (compiled in) or `WELLNESS_CATALOG_PATH`.
//! Every id a rule or remap refers to is checked at load time, so lookups
//! after a successful load cannot miss.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::classification::{Severity, SymptomCategory};

pub const ENV_CATALOG_PATH: &str = "WELLNESS_CATALOG_PATH";

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    let raw = include_str!("../config/catalog.toml");
    Catalog::from_toml_str(raw).expect("valid embedded catalog")
});

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("reading catalog from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing catalog TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("no practice `{id}` in the catalog (referenced by {referenced_by})")]
    MissingPractice { id: String, referenced_by: String },
    #[error("no quick-relief remedy `{id}` in the catalog (referenced by {referenced_by})")]
    MissingRemedy { id: String, referenced_by: String },
    #[error("duplicate catalog id `{0}`")]
    DuplicateId(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeCategory {
    Pranayama,
    Yoga,
    Ayurveda,
    Meditation,
    Lifestyle,
    Breathing,
    Herbal,
    Mindfulness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// One hand-authored recommendation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Practice {
    pub id: String,
    pub title: String,
    pub category: PracticeCategory,
    pub description: String,
    pub instructions: Vec<String>,
    pub benefits: Vec<String>,
    pub duration: String,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contraindications: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Crisis,
    Professional,
    Ngo,
    Iks,
    Community,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cost {
    Free,
    LowCost,
    Varies,
}

/// Helpline / support directory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub title: String,
    pub kind: ResourceKind,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub cost: Cost,
    pub availability: String,
}

/// Long-term plan entry; `concern = "general"` applies to every assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    #[serde(skip_serializing)]
    pub concern: String,
    pub practice: String,
    pub description: String,
    pub frequency: String,
}

/// Condition of a recommendation rule. Empty lists do not constrain.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct When {
    #[serde(default)]
    pub any_symptom: Vec<SymptomCategory>,
    #[serde(default)]
    pub severity_in: Vec<Severity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRule {
    pub name: String,
    #[serde(default)]
    pub when: When,
    pub practices: Vec<String>,
}

/// How the short-term flow maps practices onto its quick-relief remedies.
#[derive(Debug, Clone, Deserialize)]
pub struct ShortTermConfig {
    pub limit: usize,
    pub minimum: usize,
    #[serde(default)]
    pub anxiety_remedy: Option<String>,
    #[serde(default)]
    pub remap: HashMap<PracticeCategory, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub short_term: ShortTermConfig,
    pub rules: Vec<RecommendationRule>,
    pub practices: Vec<Practice>,
    #[serde(default)]
    pub remedies: Vec<Practice>,
    #[serde(default)]
    pub plans: Vec<PlanEntry>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl Catalog {
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, CatalogError> {
        let cat: Catalog = toml::from_str(toml_str)?;
        cat.check()?;
        Ok(cat)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// `$WELLNESS_CATALOG_PATH` if set, otherwise the compiled-in catalog.
    pub fn load() -> Result<Self, CatalogError> {
        match std::env::var(ENV_CATALOG_PATH) {
            Ok(p) if !p.trim().is_empty() => Self::from_path(&PathBuf::from(p)),
            _ => Ok(Self::builtin().clone()),
        }
    }

    pub fn practice(&self, id: &str) -> Result<&Practice, CatalogError> {
        self.practices
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::MissingPractice {
                id: id.to_string(),
                referenced_by: "lookup".to_string(),
            })
    }

    pub fn remedy(&self, id: &str) -> Result<&Practice, CatalogError> {
        self.remedies
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::MissingRemedy {
                id: id.to_string(),
                referenced_by: "lookup".to_string(),
            })
    }

    /// Plan entries for a concern, in catalog order.
    pub fn plans_for<'a>(&'a self, concern: &'a str) -> impl Iterator<Item = &'a PlanEntry> + 'a {
        self.plans.iter().filter(move |p| p.concern == concern)
    }

    fn check(&self) -> Result<(), CatalogError> {
        unique_ids(self.practices.iter().map(|p| p.id.as_str()))?;
        unique_ids(self.remedies.iter().map(|p| p.id.as_str()))?;
        unique_ids(self.resources.iter().map(|r| r.id.as_str()))?;

        for rule in &self.rules {
            for id in &rule.practices {
                if !self.practices.iter().any(|p| &p.id == id) {
                    return Err(CatalogError::MissingPractice {
                        id: id.clone(),
                        referenced_by: format!("rule `{}`", rule.name),
                    });
                }
            }
        }

        let remap_targets = self
            .short_term
            .remap
            .values()
            .map(|id| (id, "short_term.remap"))
            .chain(
                self.short_term
                    .anxiety_remedy
                    .iter()
                    .map(|id| (id, "short_term.anxiety_remedy")),
            );
        for (id, referenced_by) in remap_targets {
            if !self.remedies.iter().any(|r| &r.id == id) {
                return Err(CatalogError::MissingRemedy {
                    id: id.clone(),
                    referenced_by: referenced_by.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn unique_ids<'a>(ids: impl Iterator<Item = &'a str>) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId(id.to_string()));
        }
    }
    Ok(())
}
