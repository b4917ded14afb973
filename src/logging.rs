//! Logging setup. Diagnostics go to stderr so stdout carries only the art.

use crate::{LumasciiError, Result};
use tracing::Level;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` has no directive for us
    pub level: Level,
    /// Emit JSON lines instead of human-readable output
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: Level::WARN, json_format: false }
    }
}

impl LoggingConfig {
    /// Read `LUMASCII_LOG_LEVEL` and `LUMASCII_JSON_LOGS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(level) = std::env::var("LUMASCII_LOG_LEVEL") {
            if let Ok(parsed_level) = level.parse::<Level>() {
                config.level = parsed_level;
            }
        }

        if std::env::var("LUMASCII_JSON_LOGS").is_ok() {
            config.json_format = true;
        }

        config
    }

    /// Raise the level by `steps` (warn → info → debug → trace).
    pub fn verbosity(mut self, steps: u8) -> Self {
        for _ in 0..steps {
            self.level = match self.level {
                Level::ERROR => Level::WARN,
                Level::WARN => Level::INFO,
                Level::INFO => Level::DEBUG,
                _ => Level::TRACE,
            };
        }
        self
    }
}

/// Install the global subscriber.
///
/// # Errors
/// Fails if a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(config.level.into())
        .from_env_lossy();

    let layer = if config.json_format {
        fmt::layer().json().with_writer(std::io::stderr).with_filter(filter).boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| LumasciiError::Logging(e.to_string()))
}
