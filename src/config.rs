// src/config.rs
//! Runtime settings read from the environment (after `.env` is loaded).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::catalog::ENV_CATALOG_PATH;
use crate::knowledge::WatchedTable;
use crate::lexicon::ENV_LEXICON_PATH;

pub const ENV_ANALYSIS_DELAY_MS: &str = "ANALYSIS_DELAY_MS";
pub const ENV_DEBUG_ROUTES: &str = "DEBUG_ROUTES";

pub const DEFAULT_ANALYSIS_DELAY_MS: u64 = 1500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Pause before answering a free-text analysis.
    pub analysis_delay: Duration,
    /// Mount `/debug/*` routes.
    pub debug_routes: bool,
    pub lexicon_path: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            analysis_delay: Duration::from_millis(DEFAULT_ANALYSIS_DELAY_MS),
            debug_routes: false,
            lexicon_path: None,
            catalog_path: None,
        }
    }
}

impl AppConfig {
    /// Unset or malformed values fall back to defaults.
    pub fn from_env() -> Self {
        let delay_ms = parse_delay_ms(env::var(ENV_ANALYSIS_DELAY_MS).ok())
            .unwrap_or(DEFAULT_ANALYSIS_DELAY_MS);
        Self {
            analysis_delay: Duration::from_millis(delay_ms),
            debug_routes: env::var(ENV_DEBUG_ROUTES).ok().as_deref() == Some("1"),
            lexicon_path: path_env(ENV_LEXICON_PATH),
            catalog_path: path_env(ENV_CATALOG_PATH),
        }
    }

    pub fn with_analysis_delay(mut self, delay: Duration) -> Self {
        self.analysis_delay = delay;
        self
    }

    pub fn with_debug_routes(mut self, on: bool) -> Self {
        self.debug_routes = on;
        self
    }

    /// Override files worth watching for hot reload.
    pub fn watched_files(&self) -> Vec<(WatchedTable, PathBuf)> {
        let mut out = Vec::new();
        if let Some(p) = &self.lexicon_path {
            out.push((WatchedTable::Lexicon, p.clone()));
        }
        if let Some(p) = &self.catalog_path {
            out.push((WatchedTable::Catalog, p.clone()));
        }
        out
    }
}

fn parse_delay_ms(raw: Option<String>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
}

fn path_env(name: &str) -> Option<PathBuf> {
    env::var(name)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}
