//! Extraction of zero-hit elements from a coverage debug report.
//!
//! This module parses the debug-style report produced by
//! `forge coverage --report debug`, locating per-unit `Uncovered for <unit>:`
//! sections and pulling out every element explicitly marked `hits: 0`.

use crate::models::{ElementKind, RefineError, Summary, UncoveredElement};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::debug;

/// Matches one report section: the unit header plus its block, which runs
/// up to (not including) the next blank line or the end of the report.
static SECTION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Uncovered for (.+?):\n((?:.*\n)*?)(?:\n|\z)").unwrap());

/// Matches one element line inside a block. The literal `hits: 0)` anchor
/// excludes every entry with a nonzero hit count.
static ELEMENT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"- (.+): (.+), hits: 0\)").unwrap());

/// Reads the full report text from `path`.
pub fn read_report(path: &Path) -> Result<String, RefineError> {
    std::fs::read_to_string(path).map_err(|source| RefineError::InputIo {
        path: path.to_path_buf(),
        source,
    })
}

/// Extracts every zero-hit element from the report text, grouped by unit
/// and by kind in first-seen order.
///
/// Repeated section headers for the same unit accumulate into one group.
/// Text that matches neither pattern is ignored; a report with no matching
/// sections yields an empty summary.
pub fn extract(report_text: &str) -> Summary {
    let mut summary = Summary::default();

    for section in SECTION_REGEX.captures_iter(report_text) {
        let unit = &section[1];
        let block = &section[2];

        let elements = scan_elements(block);
        debug!("section '{}': {} zero-hit elements", unit, elements.len());

        // Register the unit even when its block matched nothing, so the
        // summary mirrors the sections that were actually present.
        let entry = summary.unit_entry(unit);
        for element in elements {
            entry.push(element.kind, element.description);
        }
    }

    summary
}

/// Scans one section block for zero-hit element lines.
fn scan_elements(block: &str) -> Vec<UncoveredElement> {
    ELEMENT_REGEX
        .captures_iter(block)
        .map(|caps| UncoveredElement {
            kind: ElementKind::from(&caps[1]),
            description: caps[2].to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_unit_skips_nonzero_hits() {
        let report = "Uncovered for Foo:\n- line: 10, hits: 0)\n- branch: 3, hits: 2)\n\n";
        let summary = extract(report);

        let foo = summary.get("Foo").unwrap();
        assert_eq!(foo.total(), 1);
        assert_eq!(foo.groups.len(), 1);
        assert_eq!(foo.groups[0].kind, ElementKind::Line);
        assert_eq!(foo.groups[0].descriptions, vec!["10"]);
    }

    #[test]
    fn test_extract_accumulates_repeated_sections() {
        let report = "Uncovered for Foo:\n- function: mint(), hits: 0)\n\n\
                      Uncovered for Foo:\n- function: burn(), hits: 0)\n\n";
        let summary = extract(report);

        assert_eq!(summary.units().len(), 1);
        let foo = summary.get("Foo").unwrap();
        assert_eq!(foo.total(), 2);
        assert_eq!(foo.groups[0].descriptions, vec!["mint()", "burn()"]);
    }

    #[test]
    fn test_extract_section_without_elements() {
        let report = "Uncovered for Foo:\nnothing matches here\n\n";
        let summary = extract(report);

        // The section was seen, but it contributed nothing.
        assert!(summary.get("Foo").unwrap().is_empty());
        assert_eq!(summary.total_elements(), 0);
    }

    #[test]
    fn test_extract_empty_input() {
        let summary = extract("");
        assert!(summary.is_empty());
    }

    #[test]
    fn test_extract_ignores_unrelated_text() {
        let report = "Analysing contracts...\nRunning tests...\n\n\
                      | File | % Lines |\n|------|---------|\n";
        let summary = extract(report);
        assert!(summary.is_empty());
    }

    #[test]
    fn test_extract_preserves_unit_and_kind_order() {
        let report = "Uncovered for Bar:\n\
                      - branch: 4, hits: 0)\n\
                      - line: 9, hits: 0)\n\
                      - branch: 6, hits: 0)\n\n\
                      Uncovered for Alpha:\n\
                      - line: 1, hits: 0)\n\n";
        let summary = extract(report);

        // Report order, not alphabetical order.
        assert_eq!(summary.units()[0].unit, "Bar");
        assert_eq!(summary.units()[1].unit, "Alpha");

        let bar = summary.get("Bar").unwrap();
        assert_eq!(bar.groups[0].kind, ElementKind::Branch);
        assert_eq!(bar.groups[0].descriptions, vec!["4", "6"]);
        assert_eq!(bar.groups[1].kind, ElementKind::Line);
    }

    #[test]
    fn test_extract_unit_name_with_path_and_colon() {
        let report = "Uncovered for src/Token.sol:Token:\n- function: transfer(address,uint256), hits: 0)\n\n";
        let summary = extract(report);

        let token = summary.get("src/Token.sol:Token").unwrap();
        assert_eq!(token.total(), 1);
        assert_eq!(
            token.groups[0].descriptions,
            vec!["transfer(address,uint256)"]
        );
    }

    #[test]
    fn test_extract_section_terminated_by_end_of_input() {
        // No trailing blank line: the block runs to the end of the report.
        let report = "Uncovered for Foo:\n- line: 10, hits: 0)\n";
        let summary = extract(report);

        assert_eq!(summary.get("Foo").unwrap().total(), 1);
    }

    #[test]
    fn test_extract_capitalized_kinds_group_with_lowercase() {
        let report = "Uncovered for Foo:\n\
                      - Function: mint(), hits: 0)\n\
                      - function: burn(), hits: 0)\n\n";
        let summary = extract(report);

        let foo = summary.get("Foo").unwrap();
        assert_eq!(foo.groups.len(), 1);
        assert_eq!(foo.groups[0].kind, ElementKind::Function);
        assert_eq!(foo.groups[0].descriptions, vec!["mint()", "burn()"]);
    }

    #[test]
    fn test_scan_elements_requires_zero_hit_anchor() {
        let block = "- line: 10, hits: 0)\n- line: 11, hits: 10)\n- line: 12, hits: 0\n";
        let elements = scan_elements(block);

        // `hits: 10)` has a nonzero count and `hits: 0` without the closing
        // parenthesis does not satisfy the anchor.
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].description, "10");
    }

    #[test]
    fn test_read_report_missing_file() {
        let err = read_report(Path::new("does-not-exist/debug.txt")).unwrap_err();
        assert!(matches!(err, RefineError::InputIo { .. }));
    }

    #[test]
    fn test_read_report_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.txt");
        std::fs::write(&path, "Uncovered for Foo:\n- line: 1, hits: 0)\n\n").unwrap();

        let text = read_report(&path).unwrap();
        let summary = extract(&text);
        assert_eq!(summary.get("Foo").unwrap().total(), 1);
    }

    #[test]
    fn test_extract_fixture_report() {
        let text = include_str!("../../fixtures/debug.txt");
        let summary = extract(text);

        let counter = summary.get("src/Counter.sol:Counter").unwrap();
        assert_eq!(counter.total(), 3);

        let token = summary.get("src/Token.sol:Token").unwrap();
        assert_eq!(token.total(), 4);

        // The fully covered contract appears in the report with nonzero
        // hits only, so nothing is extracted for it.
        assert!(summary.get("src/Vault.sol:Vault").unwrap().is_empty());
    }
}
