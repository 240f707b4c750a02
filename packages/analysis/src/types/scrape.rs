//! Scrape output types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An anchor considered relevant for an ethics review.
///
/// Text and href are recorded exactly as they appear in the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    /// Visible anchor text, tag-stripped and trimmed
    pub text: String,

    /// The href attribute, unresolved
    pub href: String,
}

impl PageLink {
    /// Create a new page link.
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
        }
    }
}

/// Aggregated content scraped from a website.
///
/// Produced once per analysis and consumed by the prompt builder.
/// Maps preserve document/insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeResult {
    /// The URL that was requested
    pub url: String,

    /// Page title, when the page has one
    pub title: Option<String>,

    /// Extracted main-page text, at most 50,000 characters
    pub content: String,

    /// Meta tag name/property to content, last occurrence wins
    #[serde(default)]
    pub metadata: IndexMap<String, String>,

    /// Links whose text or href mention privacy, terms, about, contact or policy
    #[serde(default)]
    pub important_links: Vec<PageLink>,

    /// Number of pages that contributed content, at least 1
    pub pages_analyzed: u32,

    /// Character length of the extracted main content
    pub content_length: usize,

    /// Per-category auxiliary page text keyed `{category}_content`
    #[serde(default)]
    pub additional_content: IndexMap<String, String>,
}

impl ScrapeResult {
    /// Create a result for a single scraped page.
    pub fn new(url: impl Into<String>, title: Option<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let content_length = content.chars().count();

        Self {
            url: url.into(),
            title,
            content,
            metadata: IndexMap::new(),
            important_links: Vec::new(),
            pages_analyzed: 1,
            content_length,
            additional_content: IndexMap::new(),
        }
    }

    /// Set the metadata map.
    pub fn with_metadata(mut self, metadata: IndexMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set the important links.
    pub fn with_links(mut self, links: Vec<PageLink>) -> Self {
        self.important_links = links;
        self
    }

    /// Record auxiliary page content under `{category}_content`.
    pub fn add_additional(&mut self, category: &str, content: impl Into<String>) {
        self.additional_content
            .insert(format!("{}_content", category), content.into());
        self.pages_analyzed += 1;
    }

    /// Check if this scrape yielded any text at all.
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty() || !self.additional_content.is_empty()
    }
}
