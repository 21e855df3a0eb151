//! Log output for the tokenizer's `tracing` events.
//!
//! The codec logs rejected tokens at `warn` and issued/verified tokens at
//! `debug`. Events carry segment counts and lengths only, never the key or
//! signature bytes. Hosts either install [`init`] globally or scope a
//! [`dispatch`] around the calls they want to observe.

use std::env;
use tracing::dispatcher::SetGlobalDefaultError;
use tracing::Dispatch;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// Target prefix of every event emitted by this crate.
pub const TARGET: &str = "tokenizer";

/// Environment variable holding the log level for [`LogConfig::from_env`].
pub const LOG_LEVEL_VAR: &str = "TOKENIZER_LOG_LEVEL";

/// Environment variable holding the log format (`text` or `json`).
pub const LOG_FORMAT_VAR: &str = "TOKENIZER_LOG_FORMAT";

/// Output format of log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Which tokenizer events are written, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Level for the `tokenizer` target (`warn`, `info`, `debug`, ...)
    pub level: String,
    /// Line format
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

impl LogConfig {
    /// Read [`LOG_LEVEL_VAR`] and [`LOG_FORMAT_VAR`], keeping defaults for
    /// unset or unrecognized values.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(level) = env::var(LOG_LEVEL_VAR) {
            if !level.trim().is_empty() {
                config.level = level.trim().to_lowercase();
            }
        }

        if let Some(format) = env::var(LOG_FORMAT_VAR).ok().as_deref().and_then(LogFormat::parse) {
            config.format = format;
        }

        config
    }

    /// Set the level.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Set the format.
    #[must_use]
    pub const fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Filter directive, e.g. `tokenizer=info`.
    #[must_use]
    pub fn directive(&self) -> String {
        format!("{}={}", TARGET, self.level)
    }
}

/// Build a dispatcher writing tokenizer events to `writer`.
///
/// Events from other targets are not written.
pub fn dispatch<W>(config: &LogConfig, writer: W) -> Dispatch
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry().with(EnvFilter::new(config.directive()));

    match config.format {
        LogFormat::Text => Dispatch::new(registry.with(fmt::layer().with_writer(writer))),
        LogFormat::Json => Dispatch::new(registry.with(fmt::layer().json().with_writer(writer))),
    }
}

/// Install a global dispatcher writing tokenizer events to stderr.
///
/// # Errors
///
/// Fails if a global dispatcher has already been installed.
pub fn init(config: &LogConfig) -> Result<(), SetGlobalDefaultError> {
    tracing::dispatcher::set_global_default(dispatch(config, std::io::stderr))?;
    tracing::info!(directive = %config.directive(), "Tokenizer logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        let config = LogConfig::default();
        assert_eq!(config.directive(), "tokenizer=info");
        assert_eq!(config.format, LogFormat::Text);
    }

    #[test]
    fn test_builder() {
        let config = LogConfig::default()
            .with_level("debug")
            .with_format(LogFormat::Json);
        assert_eq!(config.directive(), "tokenizer=debug");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(LogFormat::parse("JSON"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse(" text "), Some(LogFormat::Text));
        assert_eq!(LogFormat::parse("xml"), None);
    }

    #[test]
    fn test_from_env() {
        env::set_var(LOG_LEVEL_VAR, "WARN");
        env::set_var(LOG_FORMAT_VAR, "json");

        let config = LogConfig::from_env();

        assert_eq!(config.directive(), "tokenizer=warn");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_init_twice_fails() {
        let config = LogConfig::default().with_level("warn");
        // Another test may already own the global dispatcher
        let _ = init(&config);
        assert!(init(&config).is_err());
    }
}
