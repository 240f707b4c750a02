//! Multi-page scraping built on a [`PageRenderer`].
//!
//! A scrape always covers the requested page. With deep scan enabled it
//! also probes a small set of well-known paths (privacy policy, terms,
//! about) and folds whatever renders into the result. Auxiliary pages
//! are best effort, the main page is not.

use std::time::Duration;

use tracing::{debug, info, warn};
use url::Url;

use crate::error::{RenderError, RenderResult};
use crate::traits::renderer::PageRenderer;
use crate::types::ScrapeResult;

use super::extract::{
    extract_important_links, extract_metadata, extract_text, truncate_chars,
};

/// Upper bound on extracted auxiliary-page text, in characters.
pub const MAX_AUX_CONTENT_CHARS: usize = 10_000;

/// Well-known paths probed during a deep scan, by category.
///
/// Candidates within a category are tried in order; the first one that
/// renders wins and the rest are skipped.
const AUX_PAGES: [(&str, [&str; 3]); 3] = [
    ("privacy", ["/privacy", "/privacy-policy", "/privacidad"]),
    ("terms", ["/terms", "/terms-of-service", "/terminos"]),
    ("about", ["/about", "/about-us", "/acerca"]),
];

/// Scrapes a site through a renderer and extracts analyzable content.
pub struct Scraper<R> {
    renderer: R,
    main_timeout: Duration,
    aux_timeout: Duration,
}

impl<R: PageRenderer> Scraper<R> {
    /// Create a scraper with default timeouts (30s main, 10s auxiliary).
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            main_timeout: Duration::from_secs(30),
            aux_timeout: Duration::from_secs(10),
        }
    }

    /// Set the timeout for the main page.
    pub fn with_main_timeout(mut self, timeout: Duration) -> Self {
        self.main_timeout = timeout;
        self
    }

    /// Set the timeout for auxiliary pages.
    pub fn with_aux_timeout(mut self, timeout: Duration) -> Self {
        self.aux_timeout = timeout;
        self
    }

    /// Access the underlying renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Scrape a URL, optionally probing auxiliary pages.
    ///
    /// The main page must render; any failure there is returned as is.
    /// Auxiliary failures are logged and skipped, so a deep scan can
    /// only ever add content on top of a successful shallow scrape.
    pub async fn scrape(&self, url: &str, deep_scan: bool) -> RenderResult<ScrapeResult> {
        info!(url = %url, deep_scan, renderer = self.renderer.name(), "scraping site");

        let page = self.renderer.render(url, self.main_timeout).await?;

        let content = extract_text(&page.html);
        let metadata = extract_metadata(&page.html);
        let links = extract_important_links(&page.html);

        let mut result = ScrapeResult::new(url, page.title.clone(), content)
            .with_metadata(metadata)
            .with_links(links);

        if deep_scan {
            self.scrape_aux_pages(url, &mut result).await;
        }

        info!(
            url = %url,
            pages = result.pages_analyzed,
            chars = result.content_length,
            "scrape complete"
        );

        Ok(result)
    }

    /// Probe the well-known auxiliary paths and fold successes into the
    /// result. One page per category at most.
    async fn scrape_aux_pages(&self, base_url: &str, result: &mut ScrapeResult) {
        let base = match Url::parse(base_url) {
            Ok(base) => base,
            Err(e) => {
                warn!(url = %base_url, error = %e, "cannot resolve auxiliary paths");
                return;
            }
        };

        for (category, candidates) in AUX_PAGES {
            let mut found = false;

            for path in candidates {
                let candidate = match base.join(path) {
                    Ok(candidate) => candidate,
                    Err(e) => {
                        debug!(path, error = %e, "skipping unjoinable path");
                        continue;
                    }
                };

                match self
                    .renderer
                    .render(candidate.as_str(), self.aux_timeout)
                    .await
                {
                    Ok(page) => {
                        let text =
                            truncate_chars(extract_text(&page.html), MAX_AUX_CONTENT_CHARS);
                        if !text.is_empty() {
                            debug!(category, url = %candidate, "auxiliary page found");
                            result.add_additional(category, text);
                            found = true;
                            break;
                        }
                    }
                    Err(RenderError::Status { status, .. }) => {
                        debug!(category, url = %candidate, status, "candidate not available");
                    }
                    Err(e) => {
                        debug!(category, url = %candidate, error = %e, "candidate failed");
                    }
                }
            }

            if !found {
                warn!(category, url = %base_url, "no auxiliary page found");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockRenderer;

    #[tokio::test]
    async fn test_shallow_scrape_never_probes_aux_pages() {
        let renderer = MockRenderer::new()
            .with_page("https://site.com/", "<title>Site</title><p>hello</p>");
        let scraper = Scraper::new(renderer);

        let result = scraper.scrape("https://site.com/", false).await.unwrap();

        assert_eq!(result.pages_analyzed, 1);
        assert!(result.additional_content.is_empty());
        assert_eq!(scraper.renderer.call_count(), 1);
    }

    #[tokio::test]
    async fn test_deep_scan_collects_found_categories_only() {
        // Privacy is served from the second candidate path; terms and
        // about are missing everywhere.
        let renderer = MockRenderer::new()
            .with_page("https://site.com/", "<p>main</p>")
            .with_page("https://site.com/privacy-policy", "<p>we collect data</p>");
        let scraper = Scraper::new(renderer);

        let result = scraper.scrape("https://site.com/", true).await.unwrap();

        assert_eq!(result.pages_analyzed, 2);
        assert_eq!(
            result.additional_content.get("privacy_content").map(String::as_str),
            Some("we collect data")
        );
        assert!(!result.additional_content.contains_key("terms_content"));
        assert!(!result.additional_content.contains_key("about_content"));
    }

    #[tokio::test]
    async fn test_deep_scan_stops_at_first_candidate_hit() {
        let renderer = MockRenderer::new()
            .with_page("https://site.com/", "<p>main</p>")
            .with_page("https://site.com/privacy", "<p>first</p>")
            .with_page("https://site.com/privacy-policy", "<p>second</p>");
        let scraper = Scraper::new(renderer);

        let result = scraper.scrape("https://site.com/", true).await.unwrap();

        assert_eq!(
            result.additional_content.get("privacy_content").map(String::as_str),
            Some("first")
        );
        // 1 main + 1 privacy hit + 3 terms misses + 3 about misses
        assert_eq!(scraper.renderer.call_count(), 8);
    }

    #[tokio::test]
    async fn test_main_page_failure_propagates() {
        let renderer = MockRenderer::new();
        let scraper = Scraper::new(renderer);

        let err = scraper.scrape("https://missing.com/", true).await;
        assert!(matches!(err, Err(RenderError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_aux_timeout_is_skipped_not_fatal() {
        let renderer = MockRenderer::new()
            .with_page("https://site.com/", "<p>main</p>")
            .with_timeout("https://site.com/privacy")
            .with_page("https://site.com/privacy-policy", "<p>policy</p>");
        let scraper = Scraper::new(renderer);

        let result = scraper.scrape("https://site.com/", true).await.unwrap();

        assert_eq!(
            result.additional_content.get("privacy_content").map(String::as_str),
            Some("policy")
        );
    }

    #[tokio::test]
    async fn test_empty_aux_page_does_not_count() {
        let renderer = MockRenderer::new()
            .with_page("https://site.com/", "<p>main</p>")
            .with_page("https://site.com/about", "<script>only();</script>");
        let scraper = Scraper::new(renderer);

        let result = scraper.scrape("https://site.com/", true).await.unwrap();

        assert_eq!(result.pages_analyzed, 1);
        assert!(!result.additional_content.contains_key("about_content"));
    }

    #[tokio::test]
    async fn test_aux_paths_resolve_against_base() {
        let renderer = MockRenderer::new()
            .with_page("https://site.com/some/deep/page", "<p>main</p>")
            .with_page("https://site.com/privacy", "<p>policy</p>");
        let scraper = Scraper::new(renderer);

        let result = scraper
            .scrape("https://site.com/some/deep/page", true)
            .await
            .unwrap();

        assert!(result.additional_content.contains_key("privacy_content"));
    }

    #[tokio::test]
    async fn test_aux_uses_shorter_timeout() {
        let renderer = MockRenderer::new()
            .with_page("https://site.com/", "<p>main</p>")
            .with_page("https://site.com/privacy", "<p>policy</p>");
        let scraper = Scraper::new(renderer)
            .with_main_timeout(Duration::from_secs(40))
            .with_aux_timeout(Duration::from_secs(5));

        scraper.scrape("https://site.com/", true).await.unwrap();

        let calls = scraper.renderer.calls();
        assert_eq!(calls[0].timeout, Duration::from_secs(40));
        assert_eq!(calls[1].timeout, Duration::from_secs(5));
    }
}
