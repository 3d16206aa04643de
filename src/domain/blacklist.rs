//! Per-invocation exclusion blacklist
//!
//! Resolved once from the command line (or built-in defaults) and passed
//! into the classifier as an immutable value.

use super::ExtensionType;
use std::collections::HashSet;

/// Plugins never updated automatically unless the operator overrides the list
pub const DEFAULT_PLUGIN_BLACKLIST: &[&str] = &[
    "buddypress-group-documents",
    "buddypress-docs",
    "event-organiser",
];

/// Themes never updated automatically; empty in the default configuration
pub const DEFAULT_THEME_BLACKLIST: &[&str] = &[];

/// Extension names excluded from classification and updates, per type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blacklist {
    plugin: HashSet<String>,
    theme: HashSet<String>,
}

impl Blacklist {
    /// Resolve the blacklist from optional comma-separated exclusion lists.
    ///
    /// An absent list falls back to the built-in default for that type; a
    /// supplied list replaces the default entirely, with empty entries
    /// dropped.
    pub fn resolve(exclude_plugins: Option<&str>, exclude_themes: Option<&str>) -> Self {
        Self {
            plugin: match exclude_plugins {
                Some(raw) => parse_list(raw),
                None => default_set(DEFAULT_PLUGIN_BLACKLIST),
            },
            theme: match exclude_themes {
                Some(raw) => parse_list(raw),
                None => default_set(DEFAULT_THEME_BLACKLIST),
            },
        }
    }

    /// An empty blacklist, useful in tests
    pub fn empty() -> Self {
        Self {
            plugin: HashSet::new(),
            theme: HashSet::new(),
        }
    }

    /// Whether the named extension is excluded
    pub fn contains(&self, extension_type: ExtensionType, name: &str) -> bool {
        match extension_type {
            ExtensionType::Plugin => self.plugin.contains(name),
            ExtensionType::Theme => self.theme.contains(name),
        }
    }

    /// Number of excluded names for a type
    pub fn len(&self, extension_type: ExtensionType) -> usize {
        match extension_type {
            ExtensionType::Plugin => self.plugin.len(),
            ExtensionType::Theme => self.theme.len(),
        }
    }
}

fn parse_list(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn default_set(names: &[&str]) -> HashSet<String> {
    names.iter().map(|name| name.to_string()).collect()
}
