//! Typed errors for the analysis library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur during analysis operations.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The submitted URL could not be parsed or uses a disallowed scheme
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Rendering the main page failed
    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors that can occur while rendering a page.
#[derive(Debug, Error)]
pub enum RenderError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Non-success HTTP status
    #[error("HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Connection or render timeout
    #[error("timeout rendering: {url}")]
    Timeout { url: String },

    /// Response body could not be read
    #[error("body read error: {0}")]
    Body(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors that can occur while calling the generative model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// API rejected the request (auth, quota, bad request)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response contained no candidates or empty text
    #[error("empty model response")]
    EmptyResponse,

    /// Missing or invalid API key
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Result type alias for render operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Result type alias for model operations.
pub type ModelResult<T> = std::result::Result<T, ModelError>;
