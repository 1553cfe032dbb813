#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature the standard tracing macros are re-exported so
//! downstream crates can write `tabula_core::debug!` without a direct tracing
//! dependency. With `tracing-json` a JSON subscriber builder is available for
//! hosts that ship structured logs.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Environment variable consulted for the log filter directive.
pub const LOG_FILTER_ENV: &str = "TABULA_LOG";

/// Default filter when [`LOG_FILTER_ENV`] is unset.
pub const DEFAULT_LOG_FILTER: &str = "tabula=info";

/// Install a global JSON subscriber filtered by [`LOG_FILTER_ENV`].
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(true)
        .try_init()
        .is_ok()
}
