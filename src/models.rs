//! Data models for the coverage refiner.
//!
//! This module contains the core data structures used throughout
//! the application for representing uncovered elements and the
//! grouped summary built from a report.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Kind of a reported coverage element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A source line.
    Line,
    /// A conditional branch.
    Branch,
    /// A function or modifier.
    Function,
    /// Any kind label this tool does not recognize (kept verbatim).
    Other(String),
}

impl ElementKind {
    /// Canonical label for the kind. `Other` keeps the report's spelling.
    pub fn as_str(&self) -> &str {
        match self {
            ElementKind::Line => "line",
            ElementKind::Branch => "branch",
            ElementKind::Function => "function",
            ElementKind::Other(s) => s,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for ElementKind {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "line" => ElementKind::Line,
            "branch" => ElementKind::Branch,
            "function" => ElementKind::Function,
            _ => ElementKind::Other(s.to_string()),
        }
    }
}

impl Serialize for ElementKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single element reported with zero hits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UncoveredElement {
    /// Kind of the element (line, branch, function, ...).
    pub kind: ElementKind,
    /// Free-text identifier of the element as it appeared in the report.
    pub description: String,
}

/// Descriptions of one kind within one unit, in order of appearance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindGroup {
    /// The element kind this group collects.
    pub kind: ElementKind,
    /// Descriptions in first-seen order.
    pub descriptions: Vec<String>,
}

/// Uncovered elements of a single unit, grouped by kind.
///
/// Kinds keep their first-seen order; the handful of kinds per unit
/// makes a linear scan cheaper than a map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnitSummary {
    /// Unit name as captured from the section header.
    pub unit: String,
    /// Per-kind groups in first-seen order.
    pub groups: Vec<KindGroup>,
}

impl UnitSummary {
    /// Creates an empty summary for the given unit.
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            groups: Vec::new(),
        }
    }

    /// Appends a description under its kind, creating the group on first use.
    pub fn push(&mut self, kind: ElementKind, description: String) {
        match self.groups.iter_mut().find(|g| g.kind == kind) {
            Some(group) => group.descriptions.push(description),
            None => self.groups.push(KindGroup {
                kind,
                descriptions: vec![description],
            }),
        }
    }

    /// Total element count across all kinds.
    pub fn total(&self) -> usize {
        self.groups.iter().map(|g| g.descriptions.len()).sum()
    }

    /// True when no element was extracted for this unit.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Grouped extraction result for a whole report.
///
/// Units keep their first-seen order; an auxiliary index maps unit
/// names back to their position so repeated section headers accumulate
/// into the same group instead of overwriting it.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    units: Vec<UnitSummary>,
    index: HashMap<String, usize>,
}

impl Summary {
    /// Returns the summary for `unit`, registering it on first sight.
    pub fn unit_entry(&mut self, unit: &str) -> &mut UnitSummary {
        let pos = match self.index.get(unit) {
            Some(&pos) => pos,
            None => {
                self.units.push(UnitSummary::new(unit));
                self.index.insert(unit.to_string(), self.units.len() - 1);
                self.units.len() - 1
            }
        };
        &mut self.units[pos]
    }

    /// Records one uncovered element under its unit and kind.
    #[allow(dead_code)] // Convenience over unit_entry + push
    pub fn add(&mut self, unit: &str, kind: ElementKind, description: String) {
        self.unit_entry(unit).push(kind, description);
    }

    /// Units in first-seen order, including units with zero elements.
    pub fn units(&self) -> &[UnitSummary] {
        &self.units
    }

    /// Looks up a unit by name.
    #[allow(dead_code)] // Lookup utility
    pub fn get(&self, unit: &str) -> Option<&UnitSummary> {
        self.index.get(unit).map(|&pos| &self.units[pos])
    }

    /// Total element count across all units.
    pub fn total_elements(&self) -> usize {
        self.units.iter().map(|u| u.total()).sum()
    }

    /// True when no section header matched at all.
    #[allow(dead_code)] // Counterpart to total_elements
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Fatal I/O failures of a refine run.
///
/// Anything else (a report that matches no pattern) is not an error;
/// it just yields fewer or zero extracted elements.
#[derive(Debug, Error)]
pub enum RefineError {
    /// The input report could not be read; no output is produced.
    #[error("failed to read coverage report {}", path.display())]
    InputIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The refined summary could not be written; output may be partial.
    #[error("failed to write refined summary {}", path.display())]
    OutputIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
