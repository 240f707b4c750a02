//! Renderer implementations.

pub mod http;

pub use http::HttpRenderer;
