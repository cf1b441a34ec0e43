//! JSON writer for run reports.
//!
//! The output follows behave's JSON formatter: an array of features, each
//! holding its scenarios as `elements`, each scenario holding its `steps`
//! with a `result` object. Durations are in seconds and status labels are
//! lowercase.

use std::io::Write;

use serde::Serialize;
use stepwise_patterns::StepKeyword;

use super::{FeatureGroup, RunReport, ScenarioRecord, StepRecord};

#[derive(Serialize)]
struct JsonFeature<'a> {
    keyword: &'static str,
    name: &'a str,
    location: &'a str,
    status: &'static str,
    tags: &'a [String],
    elements: Vec<JsonScenario<'a>>,
}

#[derive(Serialize)]
struct JsonScenario<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    keyword: &'static str,
    name: &'a str,
    location: String,
    status: &'static str,
    tags: &'a [String],
    steps: Vec<JsonStep<'a>>,
}

#[derive(Serialize)]
struct JsonStep<'a> {
    keyword: &'static str,
    step_type: &'static str,
    name: &'a str,
    result: JsonResult<'a>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    output: &'a [String],
}

#[derive(Serialize)]
struct JsonResult<'a> {
    status: &'static str,
    duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<&'a str>,
}

impl<'a> From<&FeatureGroup<'a>> for JsonFeature<'a> {
    fn from(group: &FeatureGroup<'a>) -> Self {
        Self {
            keyword: "Feature",
            name: group.name(),
            location: group.path(),
            status: group.status().label(),
            tags: &[],
            elements: group.scenarios().iter().copied().map(JsonScenario::from).collect(),
        }
    }
}

impl<'a> From<&'a ScenarioRecord> for JsonScenario<'a> {
    fn from(record: &'a ScenarioRecord) -> Self {
        Self {
            kind: "scenario",
            keyword: "Scenario",
            name: record.name(),
            location: record.location(),
            status: record.status().label(),
            tags: record.tags(),
            steps: record.steps().iter().map(JsonStep::from).collect(),
        }
    }
}

impl<'a> From<&'a StepRecord> for JsonStep<'a> {
    fn from(step: &'a StepRecord) -> Self {
        Self {
            keyword: step.keyword().as_str(),
            step_type: step_type(step),
            name: step.name(),
            result: JsonResult {
                status: step.status().label(),
                duration: step.duration().as_secs_f64(),
                error_message: step.error(),
            },
            output: step.output(),
        }
    }
}

fn step_type(step: &StepRecord) -> &'static str {
    match step.resolved_keyword() {
        StepKeyword::Given | StepKeyword::And | StepKeyword::But => "given",
        StepKeyword::When => "when",
        StepKeyword::Then => "then",
    }
}

fn features(report: &RunReport) -> Vec<JsonFeature<'_>> {
    report.features().iter().map(JsonFeature::from).collect()
}

/// Serialize `report` into `writer`.
///
/// # Examples
/// ```
/// use stepwise::reporting::{RunReport, json};
///
/// let mut buffer = Vec::new();
/// json::write(&mut buffer, &RunReport::default()).expect("serialize report");
/// assert_eq!(buffer, b"[]");
/// ```
///
/// # Errors
/// Returns an error when serialization or writing fails.
pub fn write<W: Write>(writer: &mut W, report: &RunReport) -> serde_json::Result<()> {
    serde_json::to_writer(writer, &features(report))
}

/// Produce a compact JSON string for `report`.
///
/// # Errors
/// Returns an error when serialization fails.
pub fn to_string(report: &RunReport) -> serde_json::Result<String> {
    serde_json::to_string(&features(report))
}

/// Produce an indented JSON string for `report`.
///
/// # Errors
/// Returns an error when serialization fails.
pub fn to_string_pretty(report: &RunReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&features(report))
}
