//! Logging configuration using tracing

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Log format options
#[derive(Debug, Clone, Copy, Default)]
pub enum LogFormat {
    /// Human-readable format (default for development)
    #[default]
    Pretty,
    /// JSON format (for production/log aggregation)
    Json,
    /// Compact single-line format
    Compact,
}

impl LogFormat {
    /// Parse a format name, falling back to pretty
    pub fn from_name(name: &str) -> Self {
        match name {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level (default: info)
    pub level: String,
    /// Log format
    pub format: LogFormat,
    /// Include target (module path)
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: LogFormat::Pretty,
            with_target: true,
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log level
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Set the log format
    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable JSON format
    pub fn json(mut self) -> Self {
        self.format = LogFormat::Json;
        self
    }
}

/// Initialize the global tracing subscriber with default settings
pub fn init_logging() {
    init_logging_with_config(LogConfig::default());
}

/// Initialize the global tracing subscriber with custom configuration
pub fn init_logging_with_config(config: LogConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Json => {
            let fmt_layer = fmt::layer().json().with_target(config.with_target);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .init();
        }
        LogFormat::Compact => {
            let fmt_layer = fmt::layer().compact().with_target(config.with_target);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .init();
        }
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer().pretty().with_target(config.with_target);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .init();
        }
    }
}
