//! EthicsModel trait for LLM completions.

use async_trait::async_trait;

use crate::error::ModelResult;

/// Model trait for the single LLM operation the pipeline needs.
///
/// Implementations wrap a specific provider (`GeminiModel`) or return
/// canned output (`MockModel`). The pipeline treats the response as an
/// opaque string; the response validator owns all interpretation, so a
/// misbehaving model can degrade the result but never crash the
/// analysis.
#[async_trait]
pub trait EthicsModel: Send + Sync {
    /// Run one completion for the given prompt and return the raw text.
    async fn complete(&self, prompt: &str) -> ModelResult<String>;

    /// Get the model name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
