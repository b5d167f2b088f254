//! Refined summary generation.
//!
//! This module renders an extracted summary as the condensed text
//! report (and, alternatively, as JSON) and writes it to disk.

use crate::models::{KindGroup, RefineError, Summary, UnitSummary};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// Generate the condensed text summary.
///
/// Units appear in report order; units without uncovered elements are
/// skipped entirely. Each block names the unit, states the total element
/// count, then lists every kind with its count and descriptions. Output
/// depends only on the summary, so repeated runs are byte-identical.
pub fn generate_text_report(summary: &Summary) -> String {
    let mut output = String::new();

    for unit in summary.units() {
        if unit.is_empty() {
            continue;
        }
        output.push_str(&generate_unit_block(unit));
    }

    output
}

/// Generate the block for a single unit.
fn generate_unit_block(unit: &UnitSummary) -> String {
    let mut block = String::new();

    block.push_str(&format!("Contract: {}\n", unit.unit));
    block.push_str(&format!("  Uncovered elements: {}\n", unit.total()));

    for group in &unit.groups {
        if group.descriptions.is_empty() {
            continue;
        }
        block.push_str(&format!(
            "  {} ({}):\n",
            group.kind,
            group.descriptions.len()
        ));
        for description in &group.descriptions {
            block.push_str(&format!("    - {}\n", description));
        }
    }

    block.push('\n');

    block
}

/// Serializable view of the summary for the JSON format.
#[derive(Serialize)]
struct JsonReport<'a> {
    total_units: usize,
    total_elements: usize,
    units: Vec<JsonUnit<'a>>,
}

#[derive(Serialize)]
struct JsonUnit<'a> {
    unit: &'a str,
    total: usize,
    #[serde(rename = "kinds")]
    groups: &'a [KindGroup],
}

/// Generate the summary as pretty-printed JSON.
///
/// Same content and skip rules as the text format.
pub fn generate_json_report(summary: &Summary) -> Result<String> {
    let units: Vec<JsonUnit> = summary
        .units()
        .iter()
        .filter(|u| !u.is_empty())
        .map(|u| JsonUnit {
            unit: &u.unit,
            total: u.total(),
            groups: &u.groups,
        })
        .collect();

    let report = JsonReport {
        total_units: units.len(),
        total_elements: summary.total_elements(),
        units,
    };

    serde_json::to_string_pretty(&report).map_err(Into::into)
}

/// Write the rendered report, creating or truncating `path`.
pub fn save_report(content: &str, path: &Path) -> Result<(), RefineError> {
    std::fs::write(path, content).map_err(|source| RefineError::OutputIo {
        path: path.to_path_buf(),
        source,
    })
}
