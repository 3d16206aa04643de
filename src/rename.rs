//! The change-domain flow
//!
//! Validates the source and target domains against the site table, then
//! delegates the actual URL rewriting to search-replace: first across the
//! site's own tables, then across the shared network tables (plus the
//! community add-on's tables when it is active). Nothing here touches row
//! data directly.

use crate::console;
use crate::error::{AppError, RenameError};
use crate::wp::WpCli;

/// Shared tables rewritten on every rename, on top of the site's own
const GLOBAL_TABLES: &[&str] = &[
    "users",
    "usermeta",
    "blogs",
    "blogmeta",
    "signups",
    "site",
    "sitemeta",
    "registration_log",
];

/// Community add-on whose tables join the rewrite when it is active
const COMMUNITY_ADDON: &str = "buddypress";

/// Run the change-domain flow
pub fn run(wp: &WpCli, from: &str, to: &str, dry_run: bool, quiet: bool) -> Result<(), AppError> {
    let Some(blog_id) = wp.site_id_for_domain(from)? else {
        return Err(RenameError::SourceNotFound {
            domain: from.to_string(),
        }
        .into());
    };

    if wp.site_id_for_domain(to)?.is_some() {
        return Err(RenameError::TargetExists {
            domain: to.to_string(),
        }
        .into());
    }

    let base_prefix = wp.table_prefix()?;

    // Site-specific tables first.
    let site_tables = wp.tables_with_prefix(&site_table_prefix(&base_prefix, blog_id))?;
    wp.search_replace(from, to, &site_tables, dry_run)?;

    // Then the shared tables, plus the add-on's when it is active.
    let mut shared: Vec<String> = GLOBAL_TABLES
        .iter()
        .map(|table| format!("{}{}", base_prefix, table))
        .collect();
    if wp.is_plugin_active(COMMUNITY_ADDON)? {
        shared.extend(wp.tables_with_prefix(&format!("{}bp_", base_prefix))?);
    }
    wp.search_replace(from, to, &shared, dry_run)?;

    if !quiet {
        console::success("Domains switched!");
    }
    Ok(())
}

/// The table prefix for one site; the first site shares the base prefix
fn site_table_prefix(base_prefix: &str, blog_id: u64) -> String {
    if blog_id == 1 {
        base_prefix.to_string()
    } else {
        format!("{}{}_", base_prefix, blog_id)
    }
}
