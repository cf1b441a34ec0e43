//! Structured logging for the demo binary.
//!
//! Logs go to stderr so that reports written to stdout stay parseable. The
//! step runtime logs through the `log` facade; installing the subscriber with
//! `try_init` also installs the `log` bridge, so those records share the same
//! filter and format.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::DemoConfig;

fn filter_from_config(config: &DemoConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Initialise logging at the configured level.
///
/// Log level precedence (highest to lowest):
///
/// 1. CLI `--log-level`
/// 2. `STEPWISE_LOG_LEVEL`
/// 3. `info`
///
/// If a global subscriber is already set the call does nothing; the first
/// subscriber wins.
pub fn init_logging(config: &DemoConfig) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    let _ = subscriber.try_init();
}
