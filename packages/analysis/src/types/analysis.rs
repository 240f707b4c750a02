//! Analysis result types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-criterion scores, each on a 0-10 scale.
///
/// Construction is fallible on purpose: a score outside the scale
/// means the model response cannot be trusted, and callers fall back
/// to a conservative result instead of clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaScore {
    pub privacy: u8,
    pub social_impact: u8,
    pub transparency: u8,
    pub fairness: u8,
}

impl CriteriaScore {
    /// Create a score set, rejecting any value above 10.
    pub fn new(privacy: u8, social_impact: u8, transparency: u8, fairness: u8) -> Option<Self> {
        let scores = [privacy, social_impact, transparency, fairness];
        if scores.iter().any(|s| *s > 10) {
            return None;
        }
        Some(Self {
            privacy,
            social_impact,
            transparency,
            fairness,
        })
    }

    /// The neutral default used when the model omits criteria scores.
    pub fn neutral() -> Self {
        Self {
            privacy: 5,
            social_impact: 5,
            transparency: 5,
            fairness: 5,
        }
    }
}

/// Severity of a red flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A specific ethical concern found during analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedFlag {
    pub severity: Severity,

    /// Display label, e.g. "Privacy" or "Technical"
    pub category: String,

    pub description: String,

    /// Supporting quote or observation, when the model provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

impl RedFlag {
    /// Create a new red flag.
    pub fn new(
        severity: Severity,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category: category.into(),
            description: description.into(),
            evidence: None,
        }
    }

    /// Attach evidence.
    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }
}

/// Overall verdict bucket for a website.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EthicsCategory {
    Ethical,
    Warning,
    Danger,
}

/// The complete outcome of analyzing one website.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Unique id, assigned at assembly time
    pub id: Uuid,

    /// The URL that was analyzed
    pub url: String,

    /// When the analysis completed
    pub timestamp: DateTime<Utc>,

    /// Overall ethics score, 0-100
    pub overall_score: u8,

    pub category: EthicsCategory,

    /// Short human-readable headline
    pub title: String,

    /// Explanation of the verdict
    pub justification: String,

    pub criteria_scores: CriteriaScore,

    #[serde(default)]
    pub red_flags: Vec<RedFlag>,

    /// Wall-clock seconds from scrape start to validated result
    pub analysis_time: f64,

    /// Pages that contributed content
    pub pages_analyzed: u32,

    /// Character length of the main extracted content
    pub content_length: usize,

    /// Model self-reported confidence, 0.0-1.0
    pub ai_confidence: f64,

    /// Free-form pattern tags reported by the model
    #[serde(default)]
    pub detected_patterns: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_score_bounds() {
        assert!(CriteriaScore::new(0, 0, 0, 0).is_some());
        assert!(CriteriaScore::new(10, 10, 10, 10).is_some());
        assert!(CriteriaScore::new(11, 5, 5, 5).is_none());
        assert!(CriteriaScore::new(5, 5, 5, 255).is_none());
    }

    #[test]
    fn test_neutral_default() {
        let neutral = CriteriaScore::neutral();
        assert_eq!(neutral, CriteriaScore::new(5, 5, 5, 5).unwrap());
    }

    #[test]
    fn test_severity_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"high\"");
        let parsed: Severity = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(parsed, Severity::Medium);
    }

    #[test]
    fn test_category_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&EthicsCategory::Danger).unwrap(),
            "\"danger\""
        );
        let parsed: EthicsCategory = serde_json::from_str("\"ethical\"").unwrap();
        assert_eq!(parsed, EthicsCategory::Ethical);
    }

    #[test]
    fn test_red_flag_evidence_skipped_when_absent() {
        let flag = RedFlag::new(Severity::Low, "Privacy", "tracking pixels");
        let json = serde_json::to_string(&flag).unwrap();
        assert!(!json.contains("evidence"));

        let with = flag.with_evidence("third-party pixel on every page");
        let json = serde_json::to_string(&with).unwrap();
        assert!(json.contains("evidence"));
    }
}
