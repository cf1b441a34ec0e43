//! Plain-text writer for run reports.
//!
//! The layout mirrors behave's plain formatter: features, scenarios and
//! steps with their status, captured output indented under the step that
//! produced it, and a summary of counts at the end.

use std::fmt::{self, Write};

use super::{RunReport, Status, StepRecord};

/// Render `report` as plain text.
///
/// # Examples
/// ```
/// use stepwise::reporting::{RunReport, text};
///
/// let mut output = String::new();
/// text::write(&mut output, &RunReport::default()).expect("write to a String");
/// assert!(output.contains("0 scenarios passed"));
/// ```
///
/// # Errors
/// Returns an error if writing to the provided formatter fails.
pub fn write<W: Write>(writer: &mut W, report: &RunReport) -> fmt::Result {
    let features = report.features();
    for feature in &features {
        writeln!(writer, "Feature: {}  # {}", feature.name(), feature.path())?;
        for scenario in feature.scenarios() {
            writeln!(
                writer,
                "  Scenario: {}  # {}",
                scenario.name(),
                scenario.location()
            )?;
            for step in scenario.steps() {
                write_step(writer, step)?;
            }
            writer.write_char('\n')?;
        }
    }

    let feature_statuses: Vec<_> = features.iter().map(|feature| feature.status()).collect();
    let count_features =
        |status: Status| feature_statuses.iter().filter(|&&found| found == status).count();
    writeln!(
        writer,
        "{} features passed, {} failed, {} skipped",
        count_features(Status::Passed),
        count_features(Status::Failed),
        count_features(Status::Skipped),
    )?;
    writeln!(
        writer,
        "{} scenarios passed, {} failed, {} skipped, {} untested",
        report.scenario_count(Status::Passed),
        report.scenario_count(Status::Failed),
        report.scenario_count(Status::Skipped),
        report.scenario_count(Status::Untested),
    )?;
    write!(writer, "{} steps passed", report.step_count(Status::Passed))?;
    for status in Status::ALL.into_iter().skip(1) {
        write!(writer, ", {} {status}", report.step_count(status))?;
    }
    writer.write_char('\n')
}

fn write_step<W: Write>(writer: &mut W, step: &StepRecord) -> fmt::Result {
    writeln!(
        writer,
        "    {} {} ... {} in {:.3}s",
        step.keyword(),
        step.name(),
        step.status(),
        step.duration().as_secs_f64()
    )?;
    for line in step.output() {
        writeln!(writer, "      | {line}")?;
    }
    if let Some(error) = step.error() {
        writeln!(writer, "      {error}")?;
    }
    Ok(())
}
