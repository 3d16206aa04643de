//! The do-update flow
//!
//! Replays a manifest written by prepare-update. Each planned entry is
//! resolved against the currently available updates; entries whose available
//! version has left the planned series are resolved through the remote tag
//! registry instead. Resolved entries are installed one at a time with the
//! locale pinned, and the manifest is deleted once the run completes.

use crate::console;
use crate::domain::{AvailableUpdate, Blacklist, ExtensionType, UpdateRecord};
use crate::error::AppError;
use crate::manifest::Manifest;
use crate::progress::Progress;
use crate::registry::TagRegistry;
use crate::update::{resolve_available, resolve_from_tags, Resolution, SkipReason};
use crate::wp::WpCli;
use std::collections::HashMap;

/// Counts from one replay run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExecuteOutcome {
    /// Updates applied
    pub installed: usize,
    /// Entries skipped without an install
    pub skipped: usize,
    /// Installs attempted but failed
    pub failed: usize,
}

/// Run the do-update flow
pub async fn run(
    wp: &WpCli,
    registry: &dyn TagRegistry,
    blacklist: &Blacklist,
    quiet: bool,
) -> Result<ExecuteOutcome, AppError> {
    let root = wp.root().to_path_buf();
    let manifest = Manifest::read(&root)?;

    let mut outcome = ExecuteOutcome::default();
    let mut progress = Progress::new(!quiet);

    for &extension_type in ExtensionType::all() {
        let planned: Vec<&UpdateRecord> = manifest
            .records_for(extension_type)
            .iter()
            .filter(|record| !blacklist.contains(extension_type, &record.name))
            .collect();
        if planned.is_empty() {
            continue;
        }

        progress.spinner(&format!(
            "Querying available {} updates...",
            extension_type
        ));
        let available = wp.available_updates(extension_type)?;
        progress.finish_and_clear();

        let available_by_name: HashMap<&str, &AvailableUpdate> = available
            .iter()
            .map(|item| (item.name.as_str(), item))
            .collect();

        progress.start(
            planned.len() as u64,
            &format!("Applying {} updates", extension_type),
        );
        for record in planned {
            progress.set_message(&record.name);

            let resolution = resolve(record, &available_by_name, registry).await;

            match resolution {
                Resolution::Skipped(reason) => {
                    outcome.skipped += 1;
                    if !quiet {
                        console::log(&format!(
                            "Skipping {} '{}': {}.",
                            extension_type, record.name, reason
                        ));
                    }
                }
                resolution => {
                    match wp.install_update(extension_type, &record.name, resolution.version_pin())
                    {
                        Ok(()) => outcome.installed += 1,
                        Err(e) => {
                            outcome.failed += 1;
                            console::warning(&format!(
                                "Update of {} '{}' failed: {}",
                                extension_type, record.name, e
                            ));
                        }
                    }
                }
            }
            progress.inc();
        }
        progress.finish_and_clear();
    }

    // The manifest has been consumed; failing to remove it should not fail
    // an otherwise completed run.
    match Manifest::delete(&root) {
        Ok(path) => {
            if !quiet {
                console::log(&format!("Deleted {}.", path.display()));
            }
        }
        Err(e) => console::warning(&e.to_string()),
    }

    if !quiet {
        console::success("Updates completed.");
    }
    Ok(outcome)
}

async fn resolve(
    record: &UpdateRecord,
    available_by_name: &HashMap<&str, &AvailableUpdate>,
    registry: &dyn TagRegistry,
) -> Resolution {
    if let Some(resolution) =
        resolve_available(record, available_by_name.get(record.name.as_str()).copied())
    {
        return resolution;
    }

    match registry
        .fetch_tags(record.extension_type, &record.name)
        .await
    {
        Ok(tags) => resolve_from_tags(record, tags),
        Err(e) => Resolution::Skipped(SkipReason::FetchFailed(e.to_string())),
    }
}
