//! LLM prompts for the analysis pipeline.

/// Instruction preamble for the ethics assessment.
///
/// The scraped content sections are appended after this prompt. The
/// model is asked for a bare JSON object matching the response schema
/// the validator expects.
pub const ETHICS_PROMPT: &str = r#"You are an expert reviewer of digital ethics. Analyze the website content below and assess how ethically the site treats its visitors.

Evaluate four criteria, each scored from 0 (worst) to 10 (best):
1. privacy - data collection, tracking, consent, handling of personal information
2. social_impact - effect on users and society, manipulative or addictive mechanics
3. transparency - clarity about who operates the site, its purpose, and its terms
4. fairness - honest claims, absence of dark patterns, equitable treatment of users

Also derive an overall score from 0 (unethical) to 100 (exemplary) and a category:
- "ethical" for sites with no significant concerns
- "warning" for sites with issues that deserve caution
- "danger" for sites with serious or deliberate harms

Report concrete problems as red flags with severity "low", "medium" or "high" and a category key (privacy, social_impact, transparency, fairness or technical). Quote evidence from the content when you can.

Respond with ONLY a JSON object in exactly this structure:
{
    "overall_score": 0-100,
    "category": "ethical" | "warning" | "danger",
    "title": "short headline for the verdict",
    "justification": "2-3 sentence explanation of the verdict",
    "criteria_scores": {
        "privacy": 0-10,
        "social_impact": 0-10,
        "transparency": 0-10,
        "fairness": 0-10
    },
    "red_flags": [
        {
            "severity": "low" | "medium" | "high",
            "category": "privacy" | "social_impact" | "transparency" | "fairness" | "technical",
            "description": "what was found",
            "evidence": "supporting quote, if available"
        }
    ],
    "detected_patterns": ["short tags for recurring patterns"],
    "confidence": 0.0 to 1.0
}"#;
