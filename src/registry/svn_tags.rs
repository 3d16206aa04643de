//! SVN tag listing scraper
//!
//! Published extension versions live as directories under
//! `http://{plugins|themes}.svn.wordpress.org/<slug>/tags/`. The listing is
//! a plain HTML index; each tag is an `<li><a href="x.y.z/">x.y.z/</a></li>`
//! entry. There is no JSON API for this, so we scrape.

use crate::domain::ExtensionType;
use crate::error::RegistryError;
use crate::registry::{HttpClient, TagRegistry};
use async_trait::async_trait;
use regex::Regex;

/// Tag registry backed by the wordpress.org SVN directory listings
pub struct SvnTagRegistry {
    client: HttpClient,
}

impl SvnTagRegistry {
    /// Create a new SVN tag registry
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Build the tag listing URL for an extension
    fn build_url(&self, extension_type: ExtensionType, slug: &str) -> String {
        format!("http://{}/{}/tags/", extension_type.svn_host(), slug)
    }
}

#[async_trait]
impl TagRegistry for SvnTagRegistry {
    async fn fetch_tags(
        &self,
        extension_type: ExtensionType,
        slug: &str,
    ) -> Result<Vec<String>, RegistryError> {
        let url = self.build_url(extension_type, slug);

        match self.client.get_text(&url, slug).await {
            Ok(body) => Ok(parse_tag_listing(&body)),
            // A withdrawn extension has no listing at all.
            Err(RegistryError::NotFound { .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}

/// Extract tag names from an SVN HTML directory listing
pub(crate) fn parse_tag_listing(html: &str) -> Vec<String> {
    let entry = Regex::new(r#"<li><a href="[^"]*">([^<]+)</a></li>"#)
        .expect("invalid tag listing pattern");

    entry
        .captures_iter(html)
        .map(|caps| caps[1].trim_end_matches('/').to_string())
        .filter(|tag| tag != "..")
        .collect()
}
