//! Version series comparison
//!
//! An update is "major" when the first or second dotted component changes;
//! the (major, minor) pair is the update's series, used later to decide
//! whether a candidate version still belongs to the same release line.

use std::cmp::Ordering;

/// Result of comparing two versions at series granularity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesComparison {
    /// Whether the major or minor component differs
    pub is_major_update: bool,
    /// The "<major>.<minor>" series of the new version
    pub update_series: String,
}

/// Compare a new version against an old one at series granularity.
///
/// Only the first two dotted components are considered. Missing components
/// and non-numeric text coerce to 0; this leniency is intentional, so that
/// oddball versions like "3" or "1.a.0" classify without erroring.
///
/// The returned series always describes `new_version`, whether or not the
/// update is major.
pub fn compare_series(new_version: &str, old_version: &str) -> SeriesComparison {
    let new_parts: Vec<&str> = new_version.split('.').collect();
    let old_parts: Vec<&str> = old_version.split('.').collect();

    let mut is_major_update = false;
    let mut series = Vec::with_capacity(2);
    for i in 0..2 {
        let new_place = component(&new_parts, i);
        let old_place = component(&old_parts, i);

        series.push(new_place.to_string());
        if new_place != old_place {
            is_major_update = true;
        }
    }

    SeriesComparison {
        is_major_update,
        update_series: series.join("."),
    }
}

/// A single version component, defaulting to 0 when absent or non-numeric.
///
/// Mirrors an integer cast: "10" -> 10, "4b" -> 4, "beta" -> 0.
fn component(parts: &[&str], index: usize) -> u64 {
    parts
        .get(index)
        .map(|part| numeric_prefix(part))
        .unwrap_or(0)
}

fn numeric_prefix(part: &str) -> u64 {
    let digits: String = part
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Compare two full version strings for ordering scraped tag listings.
///
/// Lenient numeric comparison: a leading `v` is stripped, components are
/// split on `.` and `-`, non-numeric parts are ignored, and when all shared
/// components are equal the longer version wins.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse_parts = |s: &str| -> Vec<u64> {
        let s = s.strip_prefix('v').unwrap_or(s);
        s.split(['.', '-']).filter_map(|p| p.parse().ok()).collect()
    };

    let parts_a = parse_parts(a);
    let parts_b = parse_parts(b);

    for (pa, pb) in parts_a.iter().zip(parts_b.iter()) {
        match pa.cmp(pb) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    parts_a.len().cmp(&parts_b.len())
}
