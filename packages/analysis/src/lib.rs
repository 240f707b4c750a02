//! Website ethics analysis.
//!
//! This library scrapes a website, hands the extracted content to an
//! LLM and turns the model's answer into a validated, structured
//! ethics assessment: an overall score, per-criteria scores, red flags
//! and a verdict category.
//!
//! # Architecture
//!
//! The pipeline is built around three capability traits so every stage
//! can be swapped or mocked:
//!
//! - [`PageRenderer`] fetches a URL and returns the page HTML
//! - [`EthicsModel`] completes an analysis prompt
//! - [`ResultStore`] caches results and stores them by id
//!
//! [`Analyzer`] wires implementations of the three together and runs
//! the full flow: cache check, scrape, prompt building, model call,
//! response validation, persistence.
//!
//! # Example
//!
//! ```rust,ignore
//! use analysis::{Analyzer, GeminiModel, HttpRenderer, MemoryStore};
//!
//! let analyzer = Analyzer::new(
//!     HttpRenderer::new(),
//!     GeminiModel::from_env()?,
//!     MemoryStore::new(),
//! );
//!
//! let result = analyzer.analyze("https://example.com", true).await?;
//! println!("{}: {}/100", result.title, result.overall_score);
//! ```
//!
//! For tests, [`testing::MockRenderer`] and [`testing::MockModel`]
//! replace the network-facing pieces.

pub mod ai;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod security;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Error types
pub use error::{
    AnalysisError, ModelError, ModelResult, RenderError, RenderResult, Result,
};

// Capability traits
pub use traits::{
    AnalysisStore, EthicsModel, PageRenderer, RenderedPage, ResultCache, ResultStore,
};

// Core types
pub use types::{
    AnalysisResult, CriteriaScore, EthicsCategory, PageLink, RedFlag, ScrapeResult, Severity,
};

// Pipeline
pub use pipeline::{
    build_prompt, extract_important_links, extract_metadata, extract_text, extract_title,
    fallback_analysis, parse_analysis_response, transform_analysis, validate_response,
    AIAnalysisResponse, Analyzer, AnalyzerConfig, Scraper, ValidatedAnalysis,
};

// Implementations
pub use ai::GeminiModel;
pub use render::HttpRenderer;
pub use security::SecretString;
pub use stores::MemoryStore;
