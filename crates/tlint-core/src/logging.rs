//! Logging setup for tlint hosts
//!
//! This module is only available with the `logging` feature.
//!
//! The core only emits `tracing` events. Hosts that have no subscriber of
//! their own can install one with these helpers.

use std::sync::Once;

use tlint_config::GlobalSettings;
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

static INIT: Once = Once::new();

/// Log level for tlint output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// No logging output
    Silent,
    Error,
    Warn,
    /// Default
    #[default]
    Info,
    /// Includes every classification decision
    Debug,
    /// Includes tracker merges and gating decisions
    Trace,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Silent => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    fn as_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Silent => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "off" => Ok(LogLevel::Silent),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("Invalid log level: {}", other)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line format for the fmt layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
}

impl std::str::FromStr for LogFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "full" => Ok(LogFormat::Full),
            other => Err(format!("Invalid log format: {}", other)),
        }
    }
}

/// Initialize tlint logging with the given level
///
/// Installs a global subscriber; only the first call in a process has any
/// effect. `RUST_LOG` directives still apply on top of `level`.
///
/// ```rust,no_run
/// use tlint_core::logging::{init_logging, LogLevel};
///
/// init_logging(LogLevel::Debug);
/// ```
pub fn init_logging(level: LogLevel) {
    install(level, LogFormat::Compact);
}

/// Initialize logging from `RUST_LOG`, falling back to Info.
pub fn init_logging_from_env() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy()
        });

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_target(false).without_time())
            .init();
    });
}

/// Initialize logging from the `settings` section of the configuration.
///
/// Unrecognized values fall back to the defaults with a warning once the
/// subscriber is up.
pub fn init_logging_from_settings(settings: &GlobalSettings) {
    let level = settings.log_level.as_deref().map(str::parse::<LogLevel>);
    let format = settings.log_format.as_deref().map(str::parse::<LogFormat>);

    install(
        level.clone().and_then(Result::ok).unwrap_or_default(),
        format.clone().and_then(Result::ok).unwrap_or_default(),
    );

    for problem in [level.and_then(Result::err), format.and_then(Result::err)]
        .into_iter()
        .flatten()
    {
        tracing::warn!("{problem}, using the default");
    }
}

fn install(level: LogLevel, format: LogFormat) {
    INIT.call_once(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(level.as_level_filter().into())
            .from_env_lossy();

        let (compact, full) = match format {
            LogFormat::Compact => (
                Some(fmt::layer().compact().with_target(false).without_time()),
                None,
            ),
            LogFormat::Full => (None, Some(fmt::layer().with_target(true))),
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(compact)
            .with(full)
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_str() {
        assert_eq!("info".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("off".parse::<LogLevel>().unwrap(), LogLevel::Silent);
        assert_eq!("TRACE".parse::<LogLevel>().unwrap(), LogLevel::Trace);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevel::Debug.to_string(), "debug");
        assert_eq!(LogLevel::Silent.to_string(), "off");
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("Full".parse::<LogFormat>().unwrap(), LogFormat::Full);
        assert_eq!(LogFormat::default(), LogFormat::Compact);
        assert!("json".parse::<LogFormat>().is_err());
    }
}
