//! Demo configuration parsed from environment variables and flags.
//!
//! `STEPWISE_LOG_LEVEL` and `STEPWISE_FORMAT` pick the log level and report
//! format; the runner options come from [`RunnerConfig::from_lookup`].
//! Command-line flags override all of them.

use std::env;
use std::str::FromStr;

use stepwise::RunnerConfig;

use crate::error::DemoError;

/// Environment variable selecting the [`LogLevel`].
pub const LOG_LEVEL_ENV: &str = "STEPWISE_LOG_LEVEL";
/// Environment variable selecting the [`ReportFormat`].
pub const FORMAT_ENV: &str = "STEPWISE_FORMAT";

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Info` when not specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Everything, including per-step dispatch traces.
    Trace,
    /// Step dispatch and table lookups.
    Debug,
    /// Step output and run summaries.
    #[default]
    Info,
    /// Failing steps and unused definitions.
    Warn,
    /// Configuration and I/O failures only.
    Error,
}

impl FromStr for LogLevel {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(DemoError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// How the run report is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// behave's plain formatter.
    #[default]
    Text,
    /// behave's JSON formatter.
    Json,
    /// JUnit XML.
    Junit,
}

impl FromStr for ReportFormat {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "junit" | "xml" => Ok(Self::Junit),
            _ => Err(DemoError::InvalidConfig(format!(
                "unknown format '{s}', expected one of: text, json, junit"
            ))),
        }
    }
}

/// Configuration for one invocation of the demo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DemoConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: LogLevel,
    /// Report format.
    pub format: ReportFormat,
    /// Options handed to the runner.
    pub runner: RunnerConfig,
}

impl DemoConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `DemoError::InvalidConfig` if the log level or format variable
    /// contains an invalid value.
    pub fn from_env() -> Result<Self, DemoError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Same as [`DemoConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DemoError> {
        let log_level: Option<LogLevel> = lookup(LOG_LEVEL_ENV)
            .map(|val| val.parse())
            .transpose()?;
        let format: Option<ReportFormat> =
            lookup(FORMAT_ENV).map(|val| val.parse()).transpose()?;
        Ok(Self {
            log_level: log_level.unwrap_or_default(),
            format: format.unwrap_or_default(),
            runner: RunnerConfig::from_lookup(&lookup),
        })
    }

    /// Apply command-line overrides to an existing configuration.
    ///
    /// Boolean flags can only switch an option on.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        log_level: Option<LogLevel>,
        format: Option<ReportFormat>,
        stop_on_failure: bool,
        dry_run: bool,
    ) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(format) = format {
            self.format = format;
        }
        if stop_on_failure {
            self.runner = self.runner.with_stop_on_failure(true);
        }
        if dry_run {
            self.runner = self.runner.with_dry_run(true);
        }
        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("trace", LogLevel::Trace)]
    #[case("DEBUG", LogLevel::Debug)]
    #[case("Info", LogLevel::Info)]
    #[case("warning", LogLevel::Warn)]
    #[case("error", LogLevel::Error)]
    fn log_levels_parse_case_insensitively(#[case] raw: &str, #[case] expected: LogLevel) {
        assert_eq!(raw.parse::<LogLevel>().ok(), Some(expected));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let err = "loud"
            .parse::<LogLevel>()
            .err()
            .unwrap_or_else(|| panic!("'loud' should not parse"));
        assert!(err.to_string().contains("unknown log level 'loud'"));
    }

    #[rstest]
    #[case("text", ReportFormat::Text)]
    #[case("plain", ReportFormat::Text)]
    #[case("JSON", ReportFormat::Json)]
    #[case("xml", ReportFormat::Junit)]
    fn formats_parse(#[case] raw: &str, #[case] expected: ReportFormat) {
        assert_eq!(raw.parse::<ReportFormat>().ok(), Some(expected));
    }

    #[test]
    fn lookup_reads_every_variable() {
        let config = DemoConfig::from_lookup(|name| {
            match name {
                LOG_LEVEL_ENV => Some("debug"),
                FORMAT_ENV => Some("junit"),
                stepwise::config::DRY_RUN_ENV => Some("1"),
                _ => None,
            }
            .map(str::to_owned)
        })
        .unwrap_or_else(|err| panic!("config loads: {err}"));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.format, ReportFormat::Junit);
        assert!(config.runner.dry_run());
        assert!(!config.runner.stop_on_failure());
    }

    #[test]
    fn invalid_format_variable_is_an_error() {
        let result =
            DemoConfig::from_lookup(|name| (name == FORMAT_ENV).then(|| "yaml".to_owned()));
        assert!(matches!(result, Err(DemoError::InvalidConfig(_))));
    }

    #[test]
    fn overrides_take_precedence() {
        let config = DemoConfig::default().apply_overrides(
            Some(LogLevel::Warn),
            Some(ReportFormat::Json),
            true,
            false,
        );
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.format, ReportFormat::Json);
        assert!(config.runner.stop_on_failure());
        assert!(!config.runner.dry_run());
    }

    #[test]
    fn absent_overrides_keep_existing_values() {
        let base = DemoConfig::default().with_log_level(LogLevel::Error);
        assert_eq!(base.apply_overrides(None, None, false, false), base);
    }
}
