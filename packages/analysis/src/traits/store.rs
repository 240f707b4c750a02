//! Storage trait abstractions.
//!
//! Two concerns, split so backends can specialize:
//! - `ResultCache` - keyed, TTL-bounded cache of finished analyses
//! - `AnalysisStore` - id-addressed lookup for the read API
//!
//! `MemoryStore` implements both; a persistent backend could implement
//! either independently.

use async_trait::async_trait;
use std::time::Duration;
use uuid::Uuid;

use crate::error::Result;
use crate::types::AnalysisResult;

/// Cache of finished analyses keyed by request fingerprint.
///
/// Cache failures are advisory. Callers treat errors as misses and
/// continue with a fresh analysis.
#[async_trait]
pub trait ResultCache: Send + Sync {
    /// Look up a cached result. Expired entries read as `None`.
    async fn get_cached(&self, key: &str) -> Result<Option<AnalysisResult>>;

    /// Store a result under the key for `ttl`. Last write wins.
    async fn set_cached(&self, key: &str, result: &AnalysisResult, ttl: Duration) -> Result<()>;
}

/// Id-addressed storage of analyses for later retrieval.
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Fetch a stored analysis by id.
    async fn get_analysis(&self, id: Uuid) -> Result<Option<AnalysisResult>>;

    /// Store an analysis under its id.
    async fn store_analysis(&self, result: &AnalysisResult) -> Result<()>;
}

/// Composite trait for backends that provide both concerns.
pub trait ResultStore: ResultCache + AnalysisStore {}

/// Blanket implementation for any type implementing both traits.
impl<T: ResultCache + AnalysisStore> ResultStore for T {}
