//! Classification of listing rows into update records

use super::series::compare_series;
use crate::domain::{AvailableUpdate, Blacklist, ExtensionType, UpdateRecord, UpdateType};

/// Classify the available updates for one extension type.
///
/// Blacklisted names are dropped; everything else becomes an
/// [`UpdateRecord`] with its update type and series derived from the version
/// comparison. Output order matches the input listing order.
pub fn classify(
    extension_type: ExtensionType,
    available: &[AvailableUpdate],
    blacklist: &Blacklist,
) -> Vec<UpdateRecord> {
    available
        .iter()
        .filter(|item| !blacklist.contains(extension_type, &item.name))
        .map(|item| {
            let comparison = compare_series(&item.update_version, &item.version);

            UpdateRecord {
                extension_type,
                name: item.name.clone(),
                title: item.title.clone(),
                current_version: item.version.clone(),
                new_version: item.update_version.clone(),
                update_type: if comparison.is_major_update {
                    UpdateType::Major
                } else {
                    UpdateType::Minor
                },
                update_series: comparison.update_series,
            }
        })
        .collect()
}
