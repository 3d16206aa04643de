//! Extension type definitions for the two installable-unit kinds

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of installable extension on the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionType {
    /// A plugin
    Plugin,
    /// A theme
    Theme,
}

impl ExtensionType {
    /// Returns the slug used in manifest data and CLI commands
    pub fn slug(&self) -> &'static str {
        match self {
            ExtensionType::Plugin => "plugin",
            ExtensionType::Theme => "theme",
        }
    }

    /// Returns the capitalized display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ExtensionType::Plugin => "Plugin",
            ExtensionType::Theme => "Theme",
        }
    }

    /// Returns the host serving this type's SVN tag listings
    pub fn svn_host(&self) -> &'static str {
        match self {
            ExtensionType::Plugin => "plugins.svn.wordpress.org",
            ExtensionType::Theme => "themes.svn.wordpress.org",
        }
    }

    /// Returns both extension types, in manifest order
    pub fn all() -> &'static [ExtensionType] {
        &[ExtensionType::Plugin, ExtensionType::Theme]
    }
}

impl fmt::Display for ExtensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}
