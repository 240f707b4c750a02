// AI Ethics Detector - API server
//
// Exposes the analysis pipeline over HTTP: submit a URL, get back a
// structured ethics assessment. Routing and middleware live under
// server/, configuration in config.rs.

pub mod config;
pub mod server;

pub use config::*;
