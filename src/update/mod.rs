//! Update classification and resolution logic
//!
//! This module provides:
//! - Version series comparison (major/minor classification)
//! - The classifier that turns listing rows into update records
//! - The resolution decisions replayed from a manifest

mod classifier;
mod resolver;
mod series;

pub use classifier::classify;
pub use resolver::{resolve_available, resolve_from_tags, Resolution, SkipReason};
pub use series::{compare_series, compare_versions, SeriesComparison};
