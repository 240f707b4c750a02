//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the analysis
//! library without making real network or LLM calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{ModelError, ModelResult, RenderError, RenderResult};
use crate::traits::model::EthicsModel;
use crate::traits::renderer::{PageRenderer, RenderedPage};

/// A mock renderer for testing.
///
/// Serves canned pages by URL. URLs without a canned page fail with an
/// HTTP 404 render error, which makes exhausted candidate paths easy to
/// simulate.
#[derive(Default)]
pub struct MockRenderer {
    /// Predefined pages by URL
    pages: Arc<RwLock<HashMap<String, RenderedPage>>>,

    /// URLs that fail with a timeout instead of a 404
    timeouts: Arc<RwLock<Vec<String>>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<MockRenderCall>>>,
}

/// Record of a call made to the mock renderer.
#[derive(Debug, Clone)]
pub struct MockRenderCall {
    pub url: String,
    pub timeout: Duration,
}

impl MockRenderer {
    /// Create a new mock renderer with no pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a canned page for a URL.
    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        let url = url.into();
        let page = RenderedPage::new(html, url.clone());
        self.pages.write().unwrap().insert(url, page);
        self
    }

    /// Add a canned page with full control over the rendered output.
    pub fn with_rendered(self, url: impl Into<String>, page: RenderedPage) -> Self {
        self.pages.write().unwrap().insert(url.into(), page);
        self
    }

    /// Make a URL fail with a timeout error.
    pub fn with_timeout(self, url: impl Into<String>) -> Self {
        self.timeouts.write().unwrap().push(url.into());
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockRenderCall> {
        self.calls.read().unwrap().clone()
    }

    /// Number of render calls made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Clear call history.
    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

#[async_trait]
impl PageRenderer for MockRenderer {
    async fn render(&self, url: &str, timeout: Duration) -> RenderResult<RenderedPage> {
        self.calls.write().unwrap().push(MockRenderCall {
            url: url.to_string(),
            timeout,
        });

        if self.timeouts.read().unwrap().iter().any(|u| u == url) {
            return Err(RenderError::Timeout {
                url: url.to_string(),
            });
        }

        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| RenderError::Status {
                status: 404,
                url: url.to_string(),
            })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A mock model for testing.
///
/// Returns a fixed response, a queue of responses, or injected
/// failures. With no configuration it returns a neutral, well-formed
/// JSON payload so orchestrator tests succeed by default.
#[derive(Default)]
pub struct MockModel {
    /// Fixed response returned when the queue is empty
    response: Arc<RwLock<Option<String>>>,

    /// Queued responses, consumed first in, first out
    queue: Arc<RwLock<Vec<String>>>,

    /// When set, every call fails
    fail: Arc<RwLock<bool>>,

    /// Prompts received, for assertions
    prompts: Arc<RwLock<Vec<String>>>,
}

impl MockModel {
    /// Create a new mock model with default behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a fixed response for every call.
    pub fn with_response(self, response: impl Into<String>) -> Self {
        *self.response.write().unwrap() = Some(response.into());
        self
    }

    /// Queue a response to be consumed by the next call.
    pub fn with_queued(self, response: impl Into<String>) -> Self {
        self.queue.write().unwrap().push(response.into());
        self
    }

    /// Make every call fail.
    pub fn with_failure(self) -> Self {
        *self.fail.write().unwrap() = true;
        self
    }

    /// Get all prompts sent to this mock.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }

    /// Number of completion calls made.
    pub fn call_count(&self) -> usize {
        self.prompts.read().unwrap().len()
    }

    fn default_response() -> String {
        r#"{
            "overall_score": 50,
            "category": "warning",
            "title": "Mock Analysis",
            "justification": "Canned response from MockModel",
            "criteria_scores": {"privacy": 5, "social_impact": 5, "transparency": 5, "fairness": 5},
            "red_flags": [],
            "detected_patterns": [],
            "confidence": 0.8
        }"#
        .to_string()
    }
}

#[async_trait]
impl EthicsModel for MockModel {
    async fn complete(&self, prompt: &str) -> ModelResult<String> {
        self.prompts.write().unwrap().push(prompt.to_string());

        if *self.fail.read().unwrap() {
            return Err(ModelError::EmptyResponse);
        }

        {
            let mut queue = self.queue.write().unwrap();
            if !queue.is_empty() {
                return Ok(queue.remove(0));
            }
        }

        Ok(self
            .response
            .read()
            .unwrap()
            .clone()
            .unwrap_or_else(Self::default_response))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
