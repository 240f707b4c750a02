//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;
use uuid::Uuid;

use crate::error::Result;
use crate::traits::store::{AnalysisStore, ResultCache};
use crate::types::AnalysisResult;

struct CachedEntry {
    result: AnalysisResult,
    expires_at: DateTime<Utc>,
}

/// In-memory storage for cached and stored analyses.
///
/// Useful for testing and development. Data is lost on restart.
/// Expiry is checked lazily on read; expired entries are removed the
/// first time they are requested.
pub struct MemoryStore {
    cache: RwLock<HashMap<String, CachedEntry>>,
    analyses: RwLock<HashMap<Uuid, AnalysisResult>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
            analyses: RwLock::new(HashMap::new()),
        }
    }

    /// Clear all stored data.
    pub fn clear(&self) {
        self.cache.write().unwrap().clear();
        self.analyses.write().unwrap().clear();
    }

    /// Get the number of live cache entries.
    pub fn cache_count(&self) -> usize {
        self.cache.read().unwrap().len()
    }

    /// Get the number of stored analyses.
    pub fn analysis_count(&self) -> usize {
        self.analyses.read().unwrap().len()
    }
}

#[async_trait]
impl ResultCache for MemoryStore {
    async fn get_cached(&self, key: &str) -> Result<Option<AnalysisResult>> {
        let expired = {
            let cache = self.cache.read().unwrap();
            match cache.get(key) {
                Some(entry) if entry.expires_at > Utc::now() => {
                    return Ok(Some(entry.result.clone()))
                }
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            self.cache.write().unwrap().remove(key);
        }
        Ok(None)
    }

    async fn set_cached(&self, key: &str, result: &AnalysisResult, ttl: Duration) -> Result<()> {
        let expires_at = Utc::now()
            + chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::hours(1));
        self.cache.write().unwrap().insert(
            key.to_string(),
            CachedEntry {
                result: result.clone(),
                expires_at,
            },
        );
        Ok(())
    }
}

#[async_trait]
impl AnalysisStore for MemoryStore {
    async fn get_analysis(&self, id: Uuid) -> Result<Option<AnalysisResult>> {
        Ok(self.analyses.read().unwrap().get(&id).cloned())
    }

    async fn store_analysis(&self, result: &AnalysisResult) -> Result<()> {
        self.analyses
            .write()
            .unwrap()
            .insert(result.id, result.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CriteriaScore, EthicsCategory};

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            id: Uuid::new_v4(),
            url: "https://example.com".to_string(),
            timestamp: Utc::now(),
            overall_score: 70,
            category: EthicsCategory::Ethical,
            title: "Looks fine".to_string(),
            justification: "No obvious concerns".to_string(),
            criteria_scores: CriteriaScore::neutral(),
            red_flags: vec![],
            analysis_time: 1.2,
            pages_analyzed: 1,
            content_length: 1000,
            ai_confidence: 0.9,
            detected_patterns: vec![],
        }
    }

    #[tokio::test]
    async fn test_cache_roundtrip() {
        let store = MemoryStore::new();
        let result = sample_result();

        store
            .set_cached("key", &result, Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(store.cache_count(), 1);

        let hit = store.get_cached("key").await.unwrap();
        assert_eq!(hit.unwrap().id, result.id);

        let miss = store.get_cached("other").await.unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn test_cache_expiry() {
        let store = MemoryStore::new();
        let result = sample_result();

        store
            .set_cached("key", &result, Duration::from_secs(0))
            .await
            .unwrap();

        let hit = store.get_cached("key").await.unwrap();
        assert!(hit.is_none());
        // Expired entry is removed on read
        assert_eq!(store.cache_count(), 0);
    }

    #[tokio::test]
    async fn test_cache_last_write_wins() {
        let store = MemoryStore::new();
        let first = sample_result();
        let second = sample_result();

        store
            .set_cached("key", &first, Duration::from_secs(60))
            .await
            .unwrap();
        store
            .set_cached("key", &second, Duration::from_secs(60))
            .await
            .unwrap();

        let hit = store.get_cached("key").await.unwrap().unwrap();
        assert_eq!(hit.id, second.id);
    }

    #[tokio::test]
    async fn test_analysis_store_by_id() {
        let store = MemoryStore::new();
        let result = sample_result();

        store.store_analysis(&result).await.unwrap();
        assert_eq!(store.analysis_count(), 1);

        let found = store.get_analysis(result.id).await.unwrap();
        assert!(found.is_some());

        let missing = store.get_analysis(Uuid::new_v4()).await.unwrap();
        assert!(missing.is_none());
    }
}
