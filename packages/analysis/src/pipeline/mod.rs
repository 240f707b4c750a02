//! The analysis pipeline.
//!
//! Stages, in order: scrape (render + extract), prompt building, model
//! call, response validation. `Analyzer` orchestrates the whole run.

pub mod analyze;
pub mod extract;
pub mod prompt;
pub mod prompts;
pub mod scrape;
pub mod validate;

pub use analyze::{Analyzer, AnalyzerConfig};
pub use extract::{extract_important_links, extract_metadata, extract_text, extract_title};
pub use prompt::build_prompt;
pub use scrape::Scraper;
pub use validate::{
    fallback_analysis, parse_analysis_response, transform_analysis, validate_response,
    AIAnalysisResponse, ValidatedAnalysis,
};
