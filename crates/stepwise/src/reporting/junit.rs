//! JUnit XML writer for run reports.
//!
//! The writer produces a single `<testsuite>` document with one `<testcase>`
//! per scenario. Failed scenarios carry a `<failure>` naming the failing step
//! and its message; skipped and untested scenarios carry `<skipped>`.

use std::fmt::{self, Write};

use super::{RunReport, ScenarioRecord, Status};

/// Render `report` as a `JUnit` XML document.
///
/// # Examples
/// ```
/// use stepwise::reporting::{RunReport, junit};
///
/// let mut output = String::new();
/// junit::write(&mut output, &RunReport::default()).expect("write to a String");
/// assert!(output.contains("<testsuite name=\"stepwise\" tests=\"0\""));
/// ```
///
/// # Errors
/// Returns an error if writing to the provided formatter fails.
pub fn write<W: Write>(writer: &mut W, report: &RunReport) -> fmt::Result {
    let records = report.scenarios();
    let tests = records.len();
    let failures = records
        .iter()
        .filter(|record| record.status().is_failure())
        .count();
    let skipped = records
        .iter()
        .filter(|record| matches!(record.status(), Status::Skipped | Status::Untested))
        .count();
    let time = report_seconds(records);
    writer.write_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n")?;
    writeln!(
        writer,
        "<testsuite name=\"stepwise\" tests=\"{tests}\" failures=\"{failures}\" skipped=\"{skipped}\" time=\"{time:.6}\">",
    )?;
    for record in records {
        write_testcase(writer, record)?;
    }
    writer.write_str("</testsuite>\n")
}

fn write_testcase<W: Write>(writer: &mut W, record: &ScenarioRecord) -> fmt::Result {
    writer.write_str("  <testcase name=\"")?;
    write_escaped(writer, record.name())?;
    writer.write_str("\" classname=\"")?;
    write_escaped(writer, record.feature_path())?;
    write!(writer, "\" time=\"{:.6}\"", record.duration().as_secs_f64())?;
    match record.status() {
        Status::Passed => writer.write_str(" />\n"),
        Status::Skipped | Status::Untested => {
            writer.write_str(">\n    <skipped message=\"")?;
            writer.write_str(record.status().label())?;
            writer.write_str("\" />\n  </testcase>\n")
        }
        Status::Failed | Status::Undefined => {
            writer.write_str(">\n    <failure")?;
            if let Some(step) = record.failed_step() {
                writer.write_str(" type=\"")?;
                writer.write_str(step.status().label())?;
                writer.write_str("\" message=\"")?;
                write_escaped(writer, step.keyword().as_str())?;
                writer.write_char(' ')?;
                write_escaped(writer, step.name())?;
                writer.write_str("\">")?;
                write_escaped(writer, step.error().unwrap_or_default())?;
            } else {
                writer.write_char('>')?;
            }
            writer.write_str("</failure>\n  </testcase>\n")
        }
    }
}

fn report_seconds(records: &[ScenarioRecord]) -> f64 {
    records
        .iter()
        .map(ScenarioRecord::duration)
        .sum::<std::time::Duration>()
        .as_secs_f64()
}

fn write_escaped<W: Write>(writer: &mut W, value: &str) -> fmt::Result {
    const INVALID_REPLACEMENT: &str = "&#xFFFD;";
    for character in value.chars() {
        if !is_valid_xml_character(character) {
            writer.write_str(INVALID_REPLACEMENT)?;
            continue;
        }
        match character {
            '&' => writer.write_str("&amp;")?,
            '<' => writer.write_str("&lt;")?,
            '>' => writer.write_str("&gt;")?,
            '"' => writer.write_str("&quot;")?,
            '\'' => writer.write_str("&apos;")?,
            other => writer.write_char(other)?,
        }
    }
    Ok(())
}

fn is_valid_xml_character(character: char) -> bool {
    matches!(
        u32::from(character),
        0x09 | 0x0A | 0x0D
            | 0x20..=0xD7FF
            | 0xE000..=0xFFFD
            | 0x1_0000..=0x10_FFFF
    )
}
