//! Runs the bundled echo and blender scenarios and prints a report.
//!
//! The exit status is zero when every scenario passed, one when any failed
//! and two when the configuration is invalid.

use std::io::Write;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use eyre::WrapErr;
use tracing::{info, warn};

use blender_steps::config::{DemoConfig, LogLevel, ReportFormat};
use blender_steps::error::DemoError;
use blender_steps::logging::init_logging;
use stepwise::Runner;

/// Run echo and blender scenarios against their step definitions.
#[derive(Parser, Debug)]
#[command(name = "blender-steps", version, about)]
struct Args {
    /// Report format (text, json, junit).
    #[arg(long)]
    format: Option<ReportFormat>,

    /// Write the report to this file instead of stdout.
    #[arg(long)]
    report: Option<Utf8PathBuf>,

    /// Record scenarios after the first failure as untested.
    #[arg(long)]
    stop_on_failure: bool,

    /// Resolve steps without running them.
    #[arg(long)]
    dry_run: bool,

    /// Also run the scenarios that are expected to fail.
    #[arg(long)]
    include_failing: bool,

    /// List the registered steps and exit.
    #[arg(long)]
    list_steps: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<LogLevel>,
}

fn build_config(args: &Args) -> Result<DemoConfig, DemoError> {
    let config = DemoConfig::from_env()?;
    Ok(config.apply_overrides(args.log_level, args.format, args.stop_on_failure, args.dry_run))
}

fn main() -> eyre::Result<ExitCode> {
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&DemoConfig::default());
            tracing::error!(error = %e, "invalid configuration");
            return Ok(ExitCode::from(2));
        }
    };
    init_logging(&config);

    let registry = blender_steps::registry().wrap_err("registering steps")?;
    if args.list_steps {
        let mut listing = String::new();
        blender_steps::list_steps(&mut listing, &registry)?;
        std::io::stdout().lock().write_all(listing.as_bytes())?;
        return Ok(ExitCode::SUCCESS);
    }

    let mut scenarios = blender_steps::scenarios();
    if args.include_failing {
        scenarios.extend(blender_steps::failing_scenarios());
    }
    info!(scenarios = scenarios.len(), "running scenarios");

    let report = Runner::with_config(&registry, config.runner).run_all(&scenarios);
    let rendered = blender_steps::render(&report, config.format)?;
    match &args.report {
        Some(path) => std::fs::write(path, rendered)
            .wrap_err_with(|| format!("writing report to {path}"))?,
        None => std::io::stdout().lock().write_all(rendered.as_bytes())?,
    }

    if !config.runner.dry_run() {
        for step in registry.unused_steps() {
            warn!(
                keyword = %step.keyword(),
                pattern = %step.pattern(),
                "step definition was never used"
            );
        }
    }

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
