//! Runner configuration.
//!
//! The configuration is a plain value handed to the
//! [`Runner`](crate::Runner). [`RunnerConfig::from_env`] reads the
//! `STEPWISE_STOP_ON_FAILURE` and `STEPWISE_DRY_RUN` variables; explicit
//! setters override whatever the environment supplied.

/// Environment variable enabling [`RunnerConfig::stop_on_failure`].
pub const STOP_ON_FAILURE_ENV: &str = "STEPWISE_STOP_ON_FAILURE";
/// Environment variable enabling [`RunnerConfig::dry_run`].
pub const DRY_RUN_ENV: &str = "STEPWISE_DRY_RUN";

/// Options controlling how scenarios are run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunnerConfig {
    stop_on_failure: bool,
    dry_run: bool,
}

impl RunnerConfig {
    /// Default configuration: run every scenario and invoke every handler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the configuration from the process environment.
    ///
    /// Unset or unrecognised values leave the default in place.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Examples
    /// ```
    /// use stepwise::RunnerConfig;
    ///
    /// let config = RunnerConfig::from_lookup(|name| {
    ///     (name == "STEPWISE_STOP_ON_FAILURE").then(|| "yes".to_string())
    /// });
    /// assert!(config.stop_on_failure());
    /// assert!(!config.dry_run());
    /// ```
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |name: &str| {
            let value = lookup(name)?;
            let parsed = parse_env_bool(&value);
            if parsed.is_none() {
                log::warn!("ignoring unrecognised value '{value}' for {name}");
            }
            parsed
        };
        Self {
            stop_on_failure: flag(STOP_ON_FAILURE_ENV).unwrap_or(false),
            dry_run: flag(DRY_RUN_ENV).unwrap_or(false),
        }
    }

    /// Stop running further scenarios once one has failed.
    #[must_use]
    pub fn with_stop_on_failure(mut self, enabled: bool) -> Self {
        self.stop_on_failure = enabled;
        self
    }

    /// Resolve steps without invoking their handlers.
    #[must_use]
    pub fn with_dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Whether the runner stops after the first failing scenario.
    #[must_use]
    pub fn stop_on_failure(&self) -> bool {
        self.stop_on_failure
    }

    /// Whether handlers are skipped.
    #[must_use]
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}

/// Parse the boolean spellings accepted in environment variables.
#[must_use]
pub fn parse_env_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "Yes" | "on" | "ON" | "On" => Some(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "No" | "off" | "OFF" | "Off" => {
            Some(false)
        }
        _ => None,
    }
}
