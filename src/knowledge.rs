// src/knowledge.rs
//! Shared read-mostly state: the keyword lexicon and the recommendation
//! catalog, behind a cloneable handle that a dev-only watcher can hot-swap.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, SystemTime};
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::lexicon::Lexicon;
use crate::telemetry::is_dev_env;

pub const ENV_HOT_RELOAD: &str = "WELLNESS_HOT_RELOAD";

const POLL_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    pub lexicon: Lexicon,
    pub catalog: Catalog,
}

impl KnowledgeBase {
    pub fn builtin() -> Self {
        Self {
            lexicon: Lexicon::builtin().clone(),
            catalog: Catalog::builtin().clone(),
        }
    }

    /// Compiled-in tables unless an override file is given.
    pub fn load(lexicon_path: Option<&Path>, catalog_path: Option<&Path>) -> anyhow::Result<Self> {
        let lexicon = match lexicon_path {
            Some(p) => Lexicon::from_path(p)?,
            None => Lexicon::builtin().clone(),
        };
        let catalog = match catalog_path {
            Some(p) => Catalog::from_path(p)?,
            None => Catalog::builtin().clone(),
        };
        Ok(Self { lexicon, catalog })
    }
}

/// Threadsafe handle over the current knowledge base.
/// - Enable reload with WELLNESS_HOT_RELOAD=1
/// - Dev-gated: debug build or SHUTTLE_ENV in {local, development, dev}
#[derive(Clone)]
pub struct KnowledgeHandle {
    inner: Arc<RwLock<KnowledgeBase>>,
}

impl KnowledgeHandle {
    pub fn new(kb: KnowledgeBase) -> Self {
        Self {
            inner: Arc::new(RwLock::new(kb)),
        }
    }

    /// Run `f` against the current tables under a read lock.
    pub fn read<R>(&self, f: impl FnOnce(&KnowledgeBase) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        f(&guard)
    }

    pub fn replace_lexicon(&self, lexicon: Lexicon) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        guard.lexicon = lexicon;
    }

    pub fn replace_catalog(&self, catalog: Catalog) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        guard.catalog = catalog;
    }
}

/// Which table a watched file feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchedTable {
    Lexicon,
    Catalog,
}

fn hot_reload_enabled() -> bool {
    std::env::var(ENV_HOT_RELOAD).ok().as_deref() == Some("1") && is_dev_env()
}

/// Re-read one override file into the handle. A file that fails to parse
/// leaves the previous table in place.
pub fn reload_table(handle: &KnowledgeHandle, table: WatchedTable, path: &Path) -> bool {
    let result = match table {
        WatchedTable::Lexicon => Lexicon::from_path(path).map(|l| handle.replace_lexicon(l)),
        WatchedTable::Catalog => Catalog::from_path(path)
            .map(|c| handle.replace_catalog(c))
            .map_err(anyhow::Error::from),
    };
    match result {
        Ok(()) => {
            info!(?table, path = %path.display(), "reloaded");
            true
        }
        Err(e) => {
            warn!(?table, path = %path.display(), error = %e, "reload failed, keeping previous table");
            false
        }
    }
}

/// Poll the given override files' mtimes every 2s and swap tables on change.
/// No-op outside dev or without WELLNESS_HOT_RELOAD=1.
pub fn start_hot_reload_thread(handle: KnowledgeHandle, watched: Vec<(WatchedTable, PathBuf)>) {
    if watched.is_empty() || !hot_reload_enabled() {
        return;
    }

    thread::spawn(move || {
        let mut last: Vec<Option<SystemTime>> = vec![None; watched.len()];

        loop {
            for (i, (table, path)) in watched.iter().enumerate() {
                // Missing or unreadable files are retried next tick.
                let Ok(mtime) = fs::metadata(path).and_then(|m| m.modified()) else {
                    continue;
                };
                let changed = last[i].is_some_and(|prev| mtime > prev);
                last[i] = Some(mtime);
                if changed {
                    reload_table(&handle, *table, path);
                }
            }
            thread::sleep(POLL_INTERVAL);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::SymptomCategory;

    #[test]
    fn handle_reads_current_tables() {
        let h = KnowledgeHandle::new(KnowledgeBase::builtin());
        let n = h.read(|kb| kb.lexicon.total_keywords());
        assert_eq!(n, 79);
    }

    #[test]
    fn broken_override_keeps_previous_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.toml");
        fs::write(&path, "this is = not [valid").unwrap();

        let h = KnowledgeHandle::new(KnowledgeBase::builtin());
        assert!(!reload_table(&h, WatchedTable::Lexicon, &path));
        assert_eq!(h.read(|kb| kb.lexicon.total_keywords()), 79);
    }

    #[test]
    fn valid_override_is_swapped_in() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.toml");
        fs::write(
            &path,
            r#"
crisis_keywords = ["mayday"]
severity = []

[[categories]]
name = "sleep"
keywords = ["zzz"]
"#,
        )
        .unwrap();

        let h = KnowledgeHandle::new(KnowledgeBase::builtin());
        assert!(reload_table(&h, WatchedTable::Lexicon, &path));
        h.read(|kb| {
            assert_eq!(kb.lexicon.total_keywords(), 1);
            assert_eq!(kb.lexicon.keywords_for(SymptomCategory::Sleep), ["zzz"]);
            // catalog untouched
            assert_eq!(kb.catalog.practices.len(), 9);
        });
    }
}
