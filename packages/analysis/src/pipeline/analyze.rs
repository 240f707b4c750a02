//! The analysis orchestrator.
//!
//! Wires a renderer, a model and a store into the end-to-end flow:
//! cache check, scrape, prompt, model call, validation, persistence.
//! Model failures degrade to a fallback verdict; storage failures are
//! logged and the result is still returned.

use std::time::{Duration, Instant};

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use url::Url;
use uuid::Uuid;

use crate::error::{AnalysisError, Result};
use crate::traits::model::EthicsModel;
use crate::traits::renderer::PageRenderer;
use crate::traits::store::ResultStore;
use crate::types::AnalysisResult;

use super::prompt::build_prompt;
use super::scrape::Scraper;
use super::validate::{fallback_analysis, validate_response};

/// Tunable settings for an [`Analyzer`].
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Timeout for rendering the main page
    pub scrape_timeout: Duration,

    /// Timeout for rendering auxiliary pages
    pub aux_timeout: Duration,

    /// How long completed analyses stay cached
    pub cache_ttl: Duration,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            scrape_timeout: Duration::from_secs(30),
            aux_timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(3600),
        }
    }
}

impl AnalyzerConfig {
    /// Set the main-page render timeout.
    pub fn with_scrape_timeout(mut self, timeout: Duration) -> Self {
        self.scrape_timeout = timeout;
        self
    }

    /// Set the auxiliary-page render timeout.
    pub fn with_aux_timeout(mut self, timeout: Duration) -> Self {
        self.aux_timeout = timeout;
        self
    }

    /// Set the cache TTL for completed analyses.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}

/// Orchestrates the full analysis pipeline.
pub struct Analyzer<R, M, S> {
    scraper: Scraper<R>,
    model: M,
    store: S,
    config: AnalyzerConfig,
}

impl<R, M, S> Analyzer<R, M, S>
where
    R: PageRenderer,
    M: EthicsModel,
    S: ResultStore,
{
    /// Create an analyzer with default configuration.
    pub fn new(renderer: R, model: M, store: S) -> Self {
        Self::with_config(renderer, model, store, AnalyzerConfig::default())
    }

    /// Create an analyzer with explicit configuration.
    pub fn with_config(renderer: R, model: M, store: S, config: AnalyzerConfig) -> Self {
        let scraper = Scraper::new(renderer)
            .with_main_timeout(config.scrape_timeout)
            .with_aux_timeout(config.aux_timeout);
        Self {
            scraper,
            model,
            store,
            config,
        }
    }

    /// Analyze a website.
    ///
    /// Identical requests within the cache TTL return the stored result
    /// without touching the renderer or the model. `deep_scan` is part
    /// of the cache key, so shallow and deep runs never shadow each
    /// other.
    pub async fn analyze(&self, url: &str, deep_scan: bool) -> Result<AnalysisResult> {
        validate_url(url)?;

        let key = cache_key(url, deep_scan);
        match self.store.get_cached(&key).await {
            Ok(Some(cached)) => {
                info!(url = %url, "returning cached analysis");
                return Ok(cached);
            }
            Ok(None) => {}
            Err(e) => warn!(url = %url, error = %e, "cache read failed, treating as miss"),
        }

        info!(url = %url, deep_scan, model = self.model.name(), "starting analysis");
        let start = Instant::now();

        let scrape = self.scraper.scrape(url, deep_scan).await?;
        let prompt = build_prompt(&scrape);

        let validated = match self.model.complete(&prompt).await {
            Ok(raw) => validate_response(&raw),
            Err(e) => {
                warn!(url = %url, error = %e, "model call failed, using fallback verdict");
                fallback_analysis()
            }
        };

        let result = AnalysisResult {
            id: Uuid::new_v4(),
            url: url.to_string(),
            timestamp: Utc::now(),
            overall_score: validated.overall_score,
            category: validated.category,
            title: validated.title,
            justification: validated.justification,
            criteria_scores: validated.criteria_scores,
            red_flags: validated.red_flags,
            analysis_time: start.elapsed().as_secs_f64(),
            pages_analyzed: scrape.pages_analyzed,
            content_length: scrape.content_length,
            ai_confidence: validated.ai_confidence,
            detected_patterns: validated.detected_patterns,
        };

        if let Err(e) = self
            .store
            .set_cached(&key, &result, self.config.cache_ttl)
            .await
        {
            warn!(url = %url, error = %e, "failed to cache analysis");
        }
        if let Err(e) = self.store.store_analysis(&result).await {
            warn!(url = %url, error = %e, "failed to persist analysis");
        }

        info!(
            url = %url,
            id = %result.id,
            score = result.overall_score,
            elapsed = result.analysis_time,
            "analysis complete"
        );

        Ok(result)
    }

    /// Look up a previously stored analysis by id.
    pub async fn lookup(&self, id: Uuid) -> Result<Option<AnalysisResult>> {
        self.store.get_analysis(id).await
    }
}

/// Reject URLs the pipeline cannot meaningfully analyze.
fn validate_url(url: &str) -> Result<()> {
    let parsed = Url::parse(url).map_err(|_| AnalysisError::InvalidUrl {
        url: url.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(AnalysisError::InvalidUrl {
            url: url.to_string(),
        });
    }

    Ok(())
}

/// Cache key for an analysis request.
fn cache_key(url: &str, deep_scan: bool) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}|deep_scan={}", url, deep_scan));
    format!("{:x}", hasher.finalize())
}
