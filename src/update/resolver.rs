//! Resolution of manifest entries against currently available updates
//!
//! When a manifest is replayed, each planned update resolves in one of
//! three ways: the available update still belongs to the planned series
//! (install latest), an in-series version has to be pinned from the remote
//! tag listing, or nothing suitable exists and the entry is skipped.

use super::series::{compare_series, compare_versions};
use crate::domain::{AvailableUpdate, UpdateRecord};
use std::fmt;

/// Why a planned update was not applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The extension no longer reports an available update
    NotListed,
    /// The registry has no tags for this extension (withdrawn/unpublished)
    NoTags,
    /// No published tag belongs to the planned series
    NoSeriesMatch,
    /// The tag listing could not be fetched
    FetchFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotListed => write!(f, "no update currently available"),
            SkipReason::NoTags => write!(f, "no published tags"),
            SkipReason::NoSeriesMatch => write!(f, "no tag in the planned series"),
            SkipReason::FetchFailed(msg) => write!(f, "tag fetch failed: {}", msg),
        }
    }
}

/// Terminal resolution for one planned update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The available update matches the planned series; install it unpinned
    Latest,
    /// Install this specific version, resolved from the tag listing
    Pinned(String),
    /// Nothing will be installed
    Skipped(SkipReason),
}

impl Resolution {
    /// Whether this resolution leads to an install
    pub fn is_install(&self) -> bool {
        !matches!(self, Resolution::Skipped(_))
    }

    /// The explicit version pin, if any
    pub fn version_pin(&self) -> Option<&str> {
        match self {
            Resolution::Pinned(version) => Some(version),
            _ => None,
        }
    }
}

/// First resolution phase, from the current available-updates listing.
///
/// Returns `None` when the available version has left the planned series
/// and the remote tag listing must be consulted.
pub fn resolve_available(
    planned: &UpdateRecord,
    available: Option<&AvailableUpdate>,
) -> Option<Resolution> {
    let Some(available) = available else {
        return Some(Resolution::Skipped(SkipReason::NotListed));
    };

    let comparison = compare_series(&available.update_version, &planned.update_series);
    if !comparison.is_major_update {
        return Some(Resolution::Latest);
    }

    None
}

/// Second resolution phase, from the extension's published tag listing.
///
/// Tags are sorted descending and the first one whose (major, minor) pair
/// matches the planned series wins.
pub fn resolve_from_tags(planned: &UpdateRecord, mut tags: Vec<String>) -> Resolution {
    if tags.is_empty() {
        return Resolution::Skipped(SkipReason::NoTags);
    }

    tags.sort_by(|a, b| compare_versions(b, a));

    for tag in tags {
        let comparison = compare_series(&tag, &planned.update_series);
        if !comparison.is_major_update {
            return Resolution::Pinned(tag);
        }
    }

    Resolution::Skipped(SkipReason::NoSeriesMatch)
}
