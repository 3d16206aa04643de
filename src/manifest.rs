//! The durable JSON manifest of a planned update batch
//!
//! Written by `prepare-update`, replayed and then deleted by `do-update`.
//! Both flows use the same fixed filename under the network root.

use crate::domain::{ExtensionType, UpdateRecord};
use crate::error::ManifestError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Manifest filename under the network root, shared by both flows
pub const MANIFEST_FILENAME: &str = ".ol-update.json";

/// Per-type planned update records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestData {
    /// Planned plugin updates, in listing order
    #[serde(default)]
    pub plugin: Vec<UpdateRecord>,
    /// Planned theme updates, in listing order
    #[serde(default)]
    pub theme: Vec<UpdateRecord>,
}

/// A planned update batch, tagged with a target release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Human-readable batch header
    pub header: String,
    /// Records keyed by extension type
    pub data: ManifestData,
}

impl Manifest {
    /// Create an empty manifest for a target release version
    pub fn new(version: &str) -> Self {
        Self {
            header: format!("OpenLab upgrades for {}", version),
            data: ManifestData::default(),
        }
    }

    /// Replace the records for one extension type
    pub fn set_records(&mut self, extension_type: ExtensionType, records: Vec<UpdateRecord>) {
        match extension_type {
            ExtensionType::Plugin => self.data.plugin = records,
            ExtensionType::Theme => self.data.theme = records,
        }
    }

    /// The records planned for one extension type
    pub fn records_for(&self, extension_type: ExtensionType) -> &[UpdateRecord] {
        match extension_type {
            ExtensionType::Plugin => &self.data.plugin,
            ExtensionType::Theme => &self.data.theme,
        }
    }

    /// Total planned records across both types
    pub fn total_records(&self) -> usize {
        self.data.plugin.len() + self.data.theme.len()
    }

    /// The manifest path under a network root
    pub fn path_in(root: &Path) -> PathBuf {
        root.join(MANIFEST_FILENAME)
    }

    /// Write the manifest, pretty-printed, overwriting any prior one
    pub fn write(&self, root: &Path) -> Result<PathBuf, ManifestError> {
        let path = Self::path_in(root);
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ManifestError::parse(&path, e.to_string()))?;
        fs::write(&path, json).map_err(|e| ManifestError::write(&path, e))?;
        Ok(path)
    }

    /// Read the manifest back; absence is a distinct, fatal condition
    pub fn read(root: &Path) -> Result<Self, ManifestError> {
        let path = Self::path_in(root);
        if !path.exists() {
            return Err(ManifestError::not_found(path));
        }
        let contents = fs::read_to_string(&path).map_err(|e| ManifestError::read(&path, e))?;
        serde_json::from_str(&contents).map_err(|e| ManifestError::parse(&path, e.to_string()))
    }

    /// Delete the manifest after a completed replay
    pub fn delete(root: &Path) -> Result<PathBuf, ManifestError> {
        let path = Self::path_in(root);
        fs::remove_file(&path).map_err(|e| ManifestError::Delete {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }
}
