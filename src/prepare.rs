//! The prepare-update flow
//!
//! Queries the available-updates listing for each extension type, classifies
//! every row against the blacklist, and emits the CSV report and the JSON
//! manifest tagged with the target release version.

use crate::console;
use crate::domain::{Blacklist, ExtensionType};
use crate::error::AppError;
use crate::manifest::Manifest;
use crate::progress::Progress;
use crate::report;
use crate::update::classify;
use crate::wp::WpCli;
use regex::Regex;
use std::path::PathBuf;

/// Environment variable carrying the network's current release version
pub const VERSION_ENV: &str = "OL_VERSION";

/// Placeholder used when no target version can be determined
pub const VERSION_PLACEHOLDER: &str = "x.y.z";

/// Paths produced by a prepared batch
pub struct PrepareOutcome {
    /// The target release version the batch was tagged with
    pub version: String,
    /// Where the CSV report landed
    pub csv_path: PathBuf,
    /// Where the JSON manifest landed
    pub manifest_path: PathBuf,
}

/// Determine the target release version for a prepared batch.
///
/// An explicit `--version` wins. Otherwise the next patch release of the
/// current platform version (`major.minor.patch`, patch incremented) is
/// used; when that is absent or unparseable, the literal placeholder.
pub fn infer_release_version(explicit: Option<&str>, current: Option<&str>) -> String {
    if let Some(version) = explicit {
        return version.to_string();
    }

    if let Some(current) = current {
        let pattern =
            Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)").expect("invalid version pattern");
        if let Some(caps) = pattern.captures(current) {
            let patch: u64 = caps[3].parse().unwrap_or(0);
            return format!("{}.{}.{}", &caps[1], &caps[2], patch + 1);
        }
    }

    VERSION_PLACEHOLDER.to_string()
}

/// Run the prepare-update flow
pub fn run(
    wp: &WpCli,
    version: &str,
    blacklist: &Blacklist,
    quiet: bool,
) -> Result<PrepareOutcome, AppError> {
    if !quiet {
        console::log(&format!(
            "Preparing update for OpenLab version {}.",
            version
        ));
    }

    let mut progress = Progress::new(!quiet);
    let mut manifest = Manifest::new(version);

    for &extension_type in ExtensionType::all() {
        progress.spinner(&format!(
            "Querying available {} updates...",
            extension_type
        ));
        let available = wp.available_updates(extension_type)?;
        progress.finish_and_clear();

        let records = classify(extension_type, &available, blacklist);
        if !quiet {
            console::log(&format!(
                "Identified {} items of type '{}' with updates available.",
                records.len(),
                extension_type
            ));
        }
        manifest.set_records(extension_type, records);
    }

    let root = wp.root();
    let csv_path = report::write_csv(root, version, &manifest)?;
    if !quiet {
        console::log(&format!("Generated CSV output at {}.", csv_path.display()));
    }

    let manifest_path = manifest.write(root)?;
    if !quiet {
        console::log(&format!(
            "Generated JSON output at {}.",
            manifest_path.display()
        ));
    }

    Ok(PrepareOutcome {
        version: version.to_string(),
        csv_path,
        manifest_path,
    })
}
