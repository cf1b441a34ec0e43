//! Echo and blender step definitions, with the scenarios that exercise them.
//!
//! [`registry`] builds the step registry; [`scenarios`] and
//! [`failing_scenarios`] describe the features the binary runs against it.
//! The `blender-steps` binary wires these to a [`Runner`](stepwise::Runner)
//! and prints a report.

pub mod blender;
pub mod config;
pub mod echo;
pub mod error;
pub mod logging;

use std::fmt::Write;

use stepwise::reporting::{RunReport, json, junit, text};
use stepwise::{RegistryError, Scenario, StepRegistry};

use crate::config::ReportFormat;
use crate::error::DemoError;

/// Feature file the echo scenarios are attributed to.
pub const BASIC_FEATURE: &str = "features/basic.feature";
/// Feature file the blender scenarios are attributed to.
pub const OUTLINE_FEATURE: &str = "features/outline.feature";

/// Register every echo and blender step.
///
/// # Errors
/// Returns the first registration failure. The bundled patterns register
/// cleanly, so an error here means a pattern and its argument record have
/// drifted apart.
pub fn registry() -> Result<StepRegistry, RegistryError> {
    let mut registry = StepRegistry::new();
    registry
        .when(echo::RECORD_INPUT, echo::record_input)?
        .then(echo::VERIFY_OUTPUT, echo::verify_output)?
        .given(blender::PLACE_IN_CONTAINER, blender::place_in_container)?
        .when(blender::APPLY_TRANSFORMATION, blender::apply_transformation)?
        .then(blender::ASSERT_EQUAL, blender::assert_equal)?;
    Ok(registry)
}

fn echo_scenario(name: &str, line: u32, typed: &str, printed: &str) -> Scenario {
    Scenario::new(name)
        .in_feature("Basic", BASIC_FEATURE)
        .at(line)
        .when(format!(r#"I type in "{typed}""#))
        .then(format!(r#"It should print "{printed}""#))
}

fn blender_scenario(line: u32, thing: &str, other_thing: &str) -> Scenario {
    Scenario::new(format!("Blenders -- {thing}"))
        .in_feature("Blender", OUTLINE_FEATURE)
        .at(line)
        .with_tag("@outline")
        .given(format!(r#"I put "{thing}" in a blender"#))
        .when("I switch the blender on")
        .then(format!(r#"it should transform into "{other_thing}""#))
}

/// Scenarios that pass against [`registry`]: one echo round trip and one
/// blender example per entry in [`blender::TRANSFORMATIONS`].
#[must_use]
pub fn scenarios() -> Vec<Scenario> {
    let mut scenarios = vec![echo_scenario("Echo what was typed", 3, "hello", "hello")];
    scenarios.extend(
        blender::TRANSFORMATIONS
            .iter()
            .zip(11..)
            .map(|(&(thing, other_thing), line)| blender_scenario(line, thing, other_thing)),
    );
    scenarios
}

/// Scenarios that fail against [`registry`]: an echo mismatch and a thing
/// with no transformation.
#[must_use]
pub fn failing_scenarios() -> Vec<Scenario> {
    vec![
        echo_scenario("Echo something else", 7, "hello", "world"),
        blender_scenario(19, "unknown item", "anything"),
    ]
}

/// Render `report` in `format`.
///
/// # Errors
/// Returns [`DemoError::Render`] or [`DemoError::Json`] when the writer
/// fails.
pub fn render(report: &RunReport, format: ReportFormat) -> Result<String, DemoError> {
    let mut out = String::new();
    match format {
        ReportFormat::Text => text::write(&mut out, report)?,
        ReportFormat::Json => {
            out = json::to_string_pretty(report)?;
            out.push('\n');
        }
        ReportFormat::Junit => junit::write(&mut out, report)?,
    }
    Ok(out)
}

/// List the registered steps, one per line, with their registration site.
///
/// # Errors
/// Propagates formatter failures.
pub fn list_steps<W: Write>(writer: &mut W, registry: &StepRegistry) -> std::fmt::Result {
    for step in registry.definitions() {
        writeln!(
            writer,
            "{} {}  # {}:{}",
            step.keyword(),
            step.pattern(),
            step.file(),
            step.line()
        )?;
    }
    Ok(())
}
