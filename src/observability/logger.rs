//! Structured logger setup
//!
//! - One log line = one event, named in upper snake case
//! - JSON lines in production, human-readable text otherwise
//! - Written to stderr; stdout is reserved for command output
//! - `RUST_LOG` overrides the configured level

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Levels accepted in the configuration file
pub const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

fn default_level() -> String {
    "info".to_string()
}

/// Log output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of text
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

impl LogConfig {
    /// Whether `level` is one of [`LEVELS`], ignoring case
    pub fn has_known_level(&self) -> bool {
        LEVELS.contains(&self.level.to_lowercase().as_str())
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.to_lowercase()))
    }
}

/// Install the global subscriber.
///
/// Returns false if one was already installed; the existing one is kept.
pub fn init(config: &LogConfig) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_writer(std::io::stderr);

    let installed = if config.json {
        builder.json().flatten_event(true).try_init()
    } else {
        builder.with_target(false).try_init()
    };
    installed.is_ok()
}
