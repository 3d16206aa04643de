//! CSV report generation
//!
//! One row per classified update across both extension types, prefixed with
//! a UTF-8 byte-order mark so spreadsheet imports pick the right encoding.

use crate::error::ReportError;
use crate::manifest::Manifest;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const CSV_HEADER: [&str; 6] = [
    "Item Type",
    "Item Name",
    "Item Slug",
    "Current Version",
    "New Version",
    "Update Type",
];

/// The report path for a target release version under a network root
pub fn csv_path(root: &Path, version: &str) -> PathBuf {
    root.join(format!("openlab-{}-update.csv", version))
}

/// Write the CSV report for a manifest. Overwrites any existing report.
pub fn write_csv(root: &Path, version: &str, manifest: &Manifest) -> Result<PathBuf, ReportError> {
    let path = csv_path(root, version);
    let mut file = File::create(&path).map_err(|e| ReportError::Write {
        path: path.clone(),
        source: e,
    })?;

    let mut contents = Vec::new();
    contents.extend_from_slice(UTF8_BOM);
    contents.extend_from_slice(csv_row(&CSV_HEADER).as_bytes());

    for &extension_type in crate::domain::ExtensionType::all() {
        for record in manifest.records_for(extension_type) {
            let row = [
                record.extension_type.slug(),
                record.title.as_str(),
                record.name.as_str(),
                record.current_version.as_str(),
                record.new_version.as_str(),
                record.update_type.label(),
            ];
            contents.extend_from_slice(csv_row(&row).as_bytes());
        }
    }

    file.write_all(&contents).map_err(|e| ReportError::Write {
        path: path.clone(),
        source: e,
    })?;

    Ok(path)
}

fn csv_row(fields: &[&str]) -> String {
    let mut row = fields
        .iter()
        .map(|field| csv_field(field))
        .collect::<Vec<_>>()
        .join(",");
    row.push('\n');
    row
}

/// Quote a field when it contains a delimiter, quote, or newline
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
