//! Process-wide diagnostic sink.
//!
//! The library crates log through the `log` facade; this module installs a
//! `tracing-subscriber` formatter on stderr that also receives those `log`
//! records. Initialised once at startup and never torn down.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            with_ansi: false,
        }
    }
}

impl LogConfig {
    /// - `-q`: error only
    /// - 0 (no `-v`): info level
    /// - 1 (`-v`): debug level
    /// - 2+ (`-vv`): trace level
    #[must_use]
    pub fn from_flags(verbosity: u8, quiet: bool) -> Self {
        let level = match (quiet, verbosity) {
            (true, _) => Level::ERROR,
            (false, 0) => Level::INFO,
            (false, 1) => Level::DEBUG,
            (false, _) => Level::TRACE,
        };
        Self {
            level,
            ..Default::default()
        }
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging(config: &LogConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(config.level))
        .with_writer(std::io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(false)
        .try_init();
}

/// `RUST_LOG` overrides the flag-derived level.
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()))
}
