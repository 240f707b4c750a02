//! HTTP-based renderer implementation.
//!
//! Fetches pages over plain HTTP without executing scripts. Sites that
//! require JavaScript rendering need a different `PageRenderer` backend.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{RenderError, RenderResult};
use crate::pipeline::extract::extract_title;
use crate::traits::renderer::{PageRenderer, RenderedPage};

/// Default cap on fetched body size (5 MiB).
pub const DEFAULT_MAX_PAGE_SIZE: usize = 5 * 1024 * 1024;

/// Renderer that fetches pages via HTTP.
///
/// # Example
///
/// ```rust,ignore
/// use analysis::HttpRenderer;
///
/// let renderer = HttpRenderer::new().with_user_agent("EthicsDetector/1.0");
/// let page = renderer.render("https://example.com", Duration::from_secs(30)).await?;
/// ```
pub struct HttpRenderer {
    client: reqwest::Client,
    user_agent: String,
    max_page_size: usize,
}

impl Default for HttpRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpRenderer {
    /// Create a new HTTP renderer with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            user_agent: "EthicsDetector/1.0".to_string(),
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Cap the fetched body size in bytes. Oversized bodies are
    /// truncated, not rejected.
    pub fn with_max_page_size(mut self, bytes: usize) -> Self {
        self.max_page_size = bytes;
        self
    }

    fn truncate_body(&self, mut body: String) -> String {
        if body.len() <= self.max_page_size {
            return body;
        }
        let mut cut = self.max_page_size;
        while cut > 0 && !body.is_char_boundary(cut) {
            cut -= 1;
        }
        warn!(
            size = body.len(),
            cap = self.max_page_size,
            "Page body exceeds size cap, truncating"
        );
        body.truncate(cut);
        body
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    async fn render(&self, url: &str, timeout: Duration) -> RenderResult<RenderedPage> {
        debug!(url = %url, "HTTP render starting");

        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RenderError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    warn!(url = %url, error = %e, "HTTP request failed");
                    RenderError::Http(Box::new(e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RenderError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let final_url = response.url().to_string();

        let html = response.text().await.map_err(|e| {
            if e.is_timeout() {
                RenderError::Timeout {
                    url: url.to_string(),
                }
            } else {
                RenderError::Body(Box::new(e))
            }
        })?;

        let html = self.truncate_body(html);

        debug!(url = %url, bytes = html.len(), "Page rendered");

        let mut page = RenderedPage::new(html, final_url);
        if let Some(title) = extract_title(&page.html) {
            page = page.with_title(title);
        }

        Ok(page)
    }

    fn name(&self) -> &str {
        "http"
    }
}
