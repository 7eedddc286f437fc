// src/telemetry.rs
//! Tracing setup and the privacy helpers used by request logging.
//! User text never reaches a log line; only `anon_hash` of it does.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const DEFAULT_LOG_FILTER: &str = "wellness_analyzer=info,warn";

pub const ENV_DEV_LOG: &str = "WELLNESS_DEV_LOG";
pub const ENV_LOG_JSON: &str = "WELLNESS_LOG_JSON";

fn env_flag(name: &str) -> bool {
    std::env::var(name).ok().as_deref() == Some("1")
}

/// Debug build, or SHUTTLE_ENV in {local, development, dev}.
pub fn is_dev_env() -> bool {
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var("SHUTTLE_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// Verbose per-request diagnostics: WELLNESS_DEV_LOG=1 AND dev env.
pub fn dev_logging_enabled() -> bool {
    env_flag(ENV_DEV_LOG) && is_dev_env()
}

/// Install the global subscriber. JSON lines when WELLNESS_LOG_JSON=1,
/// compact otherwise. Safe to call twice; the second call is a no-op.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let registry = tracing_subscriber::registry().with(filter);
    let _ = if env_flag(ENV_LOG_JSON) {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().compact()).try_init()
    };
}

/// Short, stable, non-reversible id for a piece of user text.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    use std::fmt::Write as _;

    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        let _ = write!(&mut out, "{b:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anon_hash_is_short_and_stable() {
        let a = anon_hash("I feel anxious at work");
        assert_eq!(a.len(), 12);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(a, anon_hash("I feel anxious at work"));
        assert_ne!(a, anon_hash("I feel anxious at home"));
    }

    #[test]
    fn empty_text_hash_is_sha256_prefix() {
        // sha256("") = e3b0c442 98fc1c14 ...
        assert_eq!(anon_hash(""), "e3b0c44298fc");
    }
}
