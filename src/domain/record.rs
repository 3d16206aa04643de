//! Listing rows and classified update records

use super::ExtensionType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row from the available-updates listing, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableUpdate {
    /// Extension slug
    pub name: String,
    /// Display title
    pub title: String,
    /// Version the update would install
    pub update_version: String,
    /// Version currently installed
    pub version: String,
}

impl AvailableUpdate {
    /// Creates a new listing row
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        update_version: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            update_version: update_version.into(),
            version: version.into(),
        }
    }
}

/// Whether an update crosses a major/minor series boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateType {
    /// The first or second version component changed
    Major,
    /// Only later components changed
    Minor,
}

impl UpdateType {
    /// Returns the lowercase label
    pub fn label(&self) -> &'static str {
        match self {
            UpdateType::Major => "major",
            UpdateType::Minor => "minor",
        }
    }
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A classified update for one extension
///
/// Constructed once per classification pass and never mutated afterward;
/// persisted into the manifest and the CSV report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecord {
    /// Kind of extension
    #[serde(rename = "type")]
    pub extension_type: ExtensionType,
    /// Extension slug, unique within its type
    pub name: String,
    /// Display title
    pub title: String,
    /// Version currently installed
    pub current_version: String,
    /// Version the update would install
    pub new_version: String,
    /// Whether this is a major or minor update
    pub update_type: UpdateType,
    /// The (major, minor) series of `new_version`, e.g. "2.1"
    pub update_series: String,
}

impl fmt::Display for UpdateRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} -> {} ({})",
            self.extension_type, self.name, self.current_version, self.new_version, self.update_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> UpdateRecord {
        UpdateRecord {
            extension_type: ExtensionType::Plugin,
            name: "akismet".to_string(),
            title: "Akismet Anti-spam".to_string(),
            current_version: "5.3".to_string(),
            new_version: "5.4.1".to_string(),
            update_type: UpdateType::Major,
            update_series: "5.4".to_string(),
        }
    }

    #[test]
    fn test_update_type_labels() {
        assert_eq!(UpdateType::Major.label(), "major");
        assert_eq!(UpdateType::Minor.label(), "minor");
        assert_eq!(format!("{}", UpdateType::Major), "major");
    }

    #[test]
    fn test_record_display() {
        let record = sample_record();
        let shown = format!("{}", record);
        assert!(shown.contains("plugin akismet"));
        assert!(shown.contains("5.3 -> 5.4.1"));
        assert!(shown.contains("major"));
    }

    #[test]
    fn test_record_serializes_type_field() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"type\":\"plugin\""));
        assert!(json.contains("\"update_type\":\"major\""));
        assert!(json.contains("\"update_series\":\"5.4\""));
    }

    #[test]
    fn test_record_round_trip() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let parsed: UpdateRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_available_update_new() {
        let row = AvailableUpdate::new("akismet", "Akismet Anti-spam", "5.4.1", "5.3");
        assert_eq!(row.name, "akismet");
        assert_eq!(row.title, "Akismet Anti-spam");
        assert_eq!(row.update_version, "5.4.1");
        assert_eq!(row.version, "5.3");
    }
}
