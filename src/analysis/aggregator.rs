//! Statistics over an extracted summary.
//!
//! This module computes the aggregate numbers shown in the console
//! summary after a refine run. Everything here walks the summary in
//! insertion order so repeated runs print identical output.

use crate::models::Summary;

/// Number of units that contributed at least one uncovered element.
pub fn units_with_elements(summary: &Summary) -> usize {
    summary.units().iter().filter(|u| !u.is_empty()).count()
}

/// Element counts per kind across the whole summary.
///
/// Kinds appear in first-seen order, then sorted by count (highest first);
/// the sort is stable so ties keep their report order.
pub fn kind_distribution(summary: &Summary) -> Vec<(String, usize)> {
    let mut dist: Vec<(String, usize)> = Vec::new();

    for unit in summary.units() {
        for group in &unit.groups {
            let label = group.kind.as_str();
            match dist.iter_mut().find(|(kind, _)| kind == label) {
                Some((_, count)) => *count += group.descriptions.len(),
                None => dist.push((label.to_string(), group.descriptions.len())),
            }
        }
    }

    dist.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
    dist
}

/// The units with the most uncovered elements (top `n` by count).
pub fn most_uncovered_units(summary: &Summary, n: usize) -> Vec<(&str, usize)> {
    let mut counts: Vec<(&str, usize)> = summary
        .units()
        .iter()
        .map(|u| (u.unit.as_str(), u.total()))
        .filter(|(_, count)| *count > 0)
        .collect();

    counts.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
    counts.truncate(n);

    counts
}
