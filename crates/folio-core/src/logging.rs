#![forbid(unsafe_code)]

//! Logging helpers.
//!
//! Every folio crate logs through `tracing` when its `tracing` feature is on;
//! with the feature off the call sites compile away. Applications that want
//! structured output can install a JSON subscriber with [`init_json`]
//! (requires `tracing-json`).

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Environment variable read for the log filter directive.
pub const LOG_FILTER_ENV: &str = "FOLIO_LOG";

/// Default filter when [`LOG_FILTER_ENV`] is unset or invalid.
pub const DEFAULT_FILTER: &str = "folio=info,folio_core=info,folio_layout=info,folio_web=info";

/// Install a global JSON subscriber filtered by `FOLIO_LOG`.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .try_init()
        .is_ok()
}
