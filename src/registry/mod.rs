//! Remote tag registry for resolving in-series versions
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - The SVN directory-listing scraper for published extension tags

mod client;
mod svn_tags;

pub use client::HttpClient;
pub use svn_tags::SvnTagRegistry;

use crate::domain::ExtensionType;
use crate::error::RegistryError;
use async_trait::async_trait;

/// Trait for fetching the published version tags of an extension
#[async_trait]
pub trait TagRegistry: Send + Sync {
    /// Fetch all published tags for an extension.
    ///
    /// A withdrawn or never-published extension yields an empty list, not
    /// an error.
    async fn fetch_tags(
        &self,
        extension_type: ExtensionType,
        slug: &str,
    ) -> Result<Vec<String>, RegistryError>;
}
