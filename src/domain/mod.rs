//! Core domain models
//!
//! This module contains the fundamental types used throughout the application:
//! - Extension types for the two installable-unit kinds
//! - Listing rows and classified update records
//! - The per-invocation exclusion blacklist

mod blacklist;
mod extension;
mod record;

pub use blacklist::{Blacklist, DEFAULT_PLUGIN_BLACKLIST, DEFAULT_THEME_BLACKLIST};
pub use extension::ExtensionType;
pub use record::{AvailableUpdate, UpdateRecord, UpdateType};
