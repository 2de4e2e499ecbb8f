//! Logging setup.
//!
//! The configured `log.level` is used as an `EnvFilter` directive, so it can
//! be a bare level (`debug`) or per-target (`echosub=debug,tungstenite=warn`).
//! `RUST_LOG`, when set, takes precedence.

use tracing_subscriber::EnvFilter;

const FALLBACK_DIRECTIVE: &str = "info";

/// Build the filter from `RUST_LOG`, else `directive`, else `info`.
pub fn build_filter(directive: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    match EnvFilter::try_new(directive) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("Invalid log filter '{directive}': {e}; falling back to '{FALLBACK_DIRECTIVE}'");
            EnvFilter::new(FALLBACK_DIRECTIVE)
        }
    }
}

/// Install the global fmt subscriber. Later calls are ignored.
pub fn init(directive: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(directive))
        .with_target(false)
        .try_init();
}
