//! PageRenderer trait for pluggable page rendering.
//!
//! Rendering is the one piece of the pipeline that talks to the open
//! web. Implementations range from a plain HTTP fetch (`HttpRenderer`)
//! to a headless browser; the pipeline only ever sees the final HTML.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::RenderResult;

/// A rendered page as returned by a [`PageRenderer`].
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Final HTML after any rendering the implementation performs
    pub html: String,

    /// Document title, when the renderer can provide it directly
    pub title: Option<String>,

    /// URL after redirects
    pub final_url: String,
}

impl RenderedPage {
    /// Create a rendered page with minimal fields.
    pub fn new(html: impl Into<String>, final_url: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            title: None,
            final_url: final_url.into(),
        }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Check if this page has any markup at all.
    pub fn has_html(&self) -> bool {
        !self.html.trim().is_empty()
    }
}

/// Renderer trait for fetching a page's final HTML.
///
/// Implementations:
/// - `HttpRenderer` - plain HTTP fetch, no script execution
/// - `MockRenderer` - canned pages for tests
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Render a single URL within the given timeout.
    ///
    /// Failures are per-URL; callers decide whether a failure is fatal
    /// (the main page) or recoverable (auxiliary pages).
    async fn render(&self, url: &str, timeout: Duration) -> RenderResult<RenderedPage>;

    /// Get the renderer name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_page_builder() {
        let page = RenderedPage::new("<html></html>", "https://example.com").with_title("Example");

        assert_eq!(page.final_url, "https://example.com");
        assert_eq!(page.title, Some("Example".to_string()));
        assert!(page.has_html());
    }

    #[test]
    fn test_empty_html_detection() {
        let page = RenderedPage::new("   ", "https://example.com");
        assert!(!page.has_html());
    }
}
