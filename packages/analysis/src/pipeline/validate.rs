//! Validation of model responses.
//!
//! Parsing and validation are separate stages. The raw response struct
//! accepts anything JSON-shaped; `transform_analysis` then enforces the
//! rules field by field. A response that fails either stage is replaced
//! wholesale by [`fallback_analysis`] rather than partially trusted.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::types::{CriteriaScore, EthicsCategory, RedFlag, Severity};

/// Raw model response, deserialized leniently.
///
/// Every field is optional so a parse failure always means the payload
/// was not JSON at all, not that a field was missing.
#[derive(Debug, Deserialize)]
pub struct AIAnalysisResponse {
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub justification: Option<String>,
    #[serde(default)]
    pub criteria_scores: Option<serde_json::Map<String, Value>>,
    #[serde(default)]
    pub red_flags: Option<Vec<Value>>,
    #[serde(default)]
    pub detected_patterns: Option<Vec<String>>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// A model response that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedAnalysis {
    pub overall_score: u8,
    pub category: EthicsCategory,
    pub title: String,
    pub justification: String,
    pub criteria_scores: CriteriaScore,
    pub red_flags: Vec<RedFlag>,
    pub detected_patterns: Vec<String>,
    pub ai_confidence: f64,
}

/// Parse the raw model output as JSON.
pub fn parse_analysis_response(raw: &str) -> Option<AIAnalysisResponse> {
    match serde_json::from_str(raw) {
        Ok(response) => Some(response),
        Err(e) => {
            warn!(error = %e, "model response is not valid JSON");
            None
        }
    }
}

fn transform_criteria(map: &serde_json::Map<String, Value>) -> Option<CriteriaScore> {
    let score = |key: &str| -> Option<u8> {
        match map.get(key)? {
            Value::Number(n) => {
                let n = n.as_i64()?;
                u8::try_from(n).ok().filter(|n| *n <= 10)
            }
            _ => None,
        }
    };

    CriteriaScore::new(
        score("privacy")?,
        score("social_impact")?,
        score("transparency")?,
        score("fairness")?,
    )
}

/// Map a model-reported flag category onto a display label.
fn flag_category(raw: &str) -> String {
    match raw {
        "privacy" => "Privacy".to_string(),
        "social_impact" | "social" => "Social Impact".to_string(),
        "transparency" => "Transparency".to_string(),
        "fairness" => "Fairness".to_string(),
        "technical" => "Technical".to_string(),
        other => other.to_string(),
    }
}

fn transform_red_flag(value: &Value) -> Option<RedFlag> {
    let obj = value.as_object()?;

    let severity = match obj.get("severity")?.as_str()? {
        "low" => Severity::Low,
        "medium" => Severity::Medium,
        "high" => Severity::High,
        _ => return None,
    };

    let description = obj.get("description")?.as_str()?.to_string();

    let category = obj
        .get("category")
        .and_then(Value::as_str)
        .unwrap_or("technical");

    let mut flag = RedFlag::new(severity, flag_category(category), description);
    if let Some(evidence) = obj.get("evidence").and_then(Value::as_str) {
        flag = flag.with_evidence(evidence);
    }
    Some(flag)
}

/// Validate a parsed response.
///
/// Absent fields fall back to neutral defaults; present but malformed
/// fields reject the whole response. A model that answers is held to
/// the schema, a model that omits is given the benefit of the doubt.
pub fn transform_analysis(response: AIAnalysisResponse) -> Option<ValidatedAnalysis> {
    let overall_score = response
        .overall_score
        .unwrap_or(50.0)
        .clamp(0.0, 100.0)
        .round() as u8;

    let category = match response.category.as_deref() {
        Some("ethical") => EthicsCategory::Ethical,
        Some("danger") => EthicsCategory::Danger,
        _ => EthicsCategory::Warning,
    };

    let criteria_scores = match &response.criteria_scores {
        Some(map) => match transform_criteria(map) {
            Some(scores) => scores,
            None => {
                warn!("criteria scores out of range or malformed");
                return None;
            }
        },
        None => CriteriaScore::neutral(),
    };

    let mut red_flags = Vec::new();
    for value in response.red_flags.unwrap_or_default() {
        match transform_red_flag(&value) {
            Some(flag) => red_flags.push(flag),
            None => {
                warn!("malformed red flag in model response");
                return None;
            }
        }
    }

    Some(ValidatedAnalysis {
        overall_score,
        category,
        title: response
            .title
            .unwrap_or_else(|| "Analysis Completed".to_string()),
        justification: response
            .justification
            .unwrap_or_else(|| "Analysis not available".to_string()),
        criteria_scores,
        red_flags,
        detected_patterns: response.detected_patterns.unwrap_or_default(),
        ai_confidence: response.confidence.unwrap_or(0.8).clamp(0.0, 1.0),
    })
}

/// The neutral verdict used when the model fails or misbehaves.
pub fn fallback_analysis() -> ValidatedAnalysis {
    ValidatedAnalysis {
        overall_score: 50,
        category: EthicsCategory::Warning,
        title: "Limited Analysis".to_string(),
        justification: "The full analysis could not be completed. Manual review is recommended."
            .to_string(),
        criteria_scores: CriteriaScore::neutral(),
        red_flags: vec![RedFlag::new(
            Severity::Medium,
            "Technical",
            "Automated analysis unavailable",
        )
        .with_evidence("AI processing error")],
        detected_patterns: vec!["analysis_error".to_string()],
        ai_confidence: 0.1,
    }
}

/// Parse and validate a raw model response, falling back on failure.
pub fn validate_response(raw: &str) -> ValidatedAnalysis {
    parse_analysis_response(raw)
        .and_then(transform_analysis)
        .unwrap_or_else(fallback_analysis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_valid_response() {
        let raw = r#"{
            "overall_score": 85,
            "category": "ethical",
            "title": "Respectful Site",
            "justification": "Clear terms and minimal tracking.",
            "criteria_scores": {"privacy": 9, "social_impact": 8, "transparency": 9, "fairness": 8},
            "red_flags": [
                {"severity": "low", "category": "privacy", "description": "Analytics cookie", "evidence": "we use cookies"}
            ],
            "detected_patterns": ["newsletter_nag"],
            "confidence": 0.92
        }"#;

        let validated = validate_response(raw);

        assert_eq!(validated.overall_score, 85);
        assert_eq!(validated.category, EthicsCategory::Ethical);
        assert_eq!(validated.title, "Respectful Site");
        assert_eq!(validated.criteria_scores.privacy, 9);
        assert_eq!(validated.red_flags.len(), 1);
        assert_eq!(validated.red_flags[0].category, "Privacy");
        assert_eq!(
            validated.red_flags[0].evidence.as_deref(),
            Some("we use cookies")
        );
        assert_eq!(validated.detected_patterns, vec!["newsletter_nag"]);
        assert_eq!(validated.ai_confidence, 0.92);
    }

    #[test]
    fn test_minimal_response_gets_defaults() {
        let validated = validate_response("{}");

        assert_eq!(validated.overall_score, 50);
        assert_eq!(validated.category, EthicsCategory::Warning);
        assert_eq!(validated.title, "Analysis Completed");
        assert_eq!(validated.justification, "Analysis not available");
        assert_eq!(validated.criteria_scores, CriteriaScore::neutral());
        assert!(validated.red_flags.is_empty());
        assert_eq!(validated.ai_confidence, 0.8);
    }

    #[test]
    fn test_garbage_falls_back() {
        assert_eq!(validate_response("not json at all"), fallback_analysis());
        assert_eq!(validate_response(""), fallback_analysis());
    }

    #[test]
    fn test_out_of_range_criteria_rejects_whole_response() {
        let raw = r#"{
            "overall_score": 90,
            "criteria_scores": {"privacy": 11, "social_impact": 5, "transparency": 5, "fairness": 5}
        }"#;
        assert_eq!(validate_response(raw), fallback_analysis());
    }

    #[test]
    fn test_float_criteria_rejects_whole_response() {
        let raw = r#"{
            "criteria_scores": {"privacy": 7.5, "social_impact": 5, "transparency": 5, "fairness": 5}
        }"#;
        assert_eq!(validate_response(raw), fallback_analysis());
    }

    #[test]
    fn test_missing_criteria_key_rejects() {
        let raw = r#"{
            "criteria_scores": {"privacy": 7, "transparency": 5, "fairness": 5}
        }"#;
        assert_eq!(validate_response(raw), fallback_analysis());
    }

    #[test]
    fn test_overall_score_is_clamped() {
        let validated = validate_response(r#"{"overall_score": 150}"#);
        assert_eq!(validated.overall_score, 100);

        let validated = validate_response(r#"{"overall_score": -3}"#);
        assert_eq!(validated.overall_score, 0);
    }

    #[test]
    fn test_unknown_category_becomes_warning() {
        let validated = validate_response(r#"{"category": "excellent"}"#);
        assert_eq!(validated.category, EthicsCategory::Warning);
    }

    #[test]
    fn test_red_flag_without_description_rejects() {
        let raw = r#"{"red_flags": [{"severity": "high", "category": "privacy"}]}"#;
        assert_eq!(validate_response(raw), fallback_analysis());
    }

    #[test]
    fn test_red_flag_with_bad_severity_rejects() {
        let raw = r#"{"red_flags": [{"severity": "critical", "description": "x"}]}"#;
        assert_eq!(validate_response(raw), fallback_analysis());
    }

    #[test]
    fn test_red_flag_category_defaults_to_technical() {
        let raw = r#"{"red_flags": [{"severity": "low", "description": "x"}]}"#;
        let validated = validate_response(raw);
        assert_eq!(validated.red_flags[0].category, "Technical");
    }

    #[test]
    fn test_flag_category_translation() {
        assert_eq!(flag_category("social"), "Social Impact");
        assert_eq!(flag_category("social_impact"), "Social Impact");
        assert_eq!(flag_category("fairness"), "Fairness");
        assert_eq!(flag_category("custom_thing"), "custom_thing");
    }

    #[test]
    fn test_confidence_is_clamped() {
        let validated = validate_response(r#"{"confidence": 1.7}"#);
        assert_eq!(validated.ai_confidence, 1.0);
    }
}
