//! Logging settings consumed by the server's tracing setup.
//!
//! - `LOG_LEVEL`: level for the `quill` crates (default: `info`)
//! - `LOG_FORMAT`: `compact` or `json` console output (default: `compact`)
//! - `LOG_DIR`: when set, a daily rolling JSON log file is written there

use std::env;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" | "pretty" | "text" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            dir: None,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_source(&|key: &str| env::var(key).ok())
    }

    pub fn from_source<F>(get: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            level: get("LOG_LEVEL").unwrap_or(defaults.level),
            format: crate::parse_or(get, "LOG_FORMAT", defaults.format),
            dir: get("LOG_DIR").filter(|d| !d.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::source;

    #[test]
    fn test_parses_format() {
        let config = LoggingConfig::from_source(&source(&[
            ("LOG_FORMAT", "JSON"),
            ("LOG_DIR", "/var/log/quill"),
        ]));
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.dir.as_deref(), Some("/var/log/quill"));
    }

    #[test]
    fn test_unknown_format_is_compact() {
        let config = LoggingConfig::from_source(&source(&[("LOG_FORMAT", "xml")]));
        assert_eq!(config.format, LogFormat::Compact);
    }
}
