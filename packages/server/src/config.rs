use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub redis_url: Option<String>,
    pub cors_origins: Vec<String>,
    pub allowed_hosts: Vec<String>,
    pub rate_limit_per_minute: u32,
    pub max_concurrent_analyses: usize,
    pub user_agent: String,
    pub scraping_timeout: u64,
    pub max_page_size: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            google_api_key: env::var("GOOGLE_API_KEY")
                .context("GOOGLE_API_KEY must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            database_url: env::var("DATABASE_URL").ok(),
            redis_url: env::var("REDIS_URL").ok(),
            cors_origins: csv_values(
                &env::var("CORS_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            ),
            allowed_hosts: csv_values(
                &env::var("ALLOWED_HOSTS")
                    .unwrap_or_else(|_| "localhost,127.0.0.1".to_string()),
            ),
            rate_limit_per_minute: env::var("RATE_LIMIT_PER_MINUTE")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("RATE_LIMIT_PER_MINUTE must be a valid number")?,
            max_concurrent_analyses: env::var("MAX_CONCURRENT_ANALYSES")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("MAX_CONCURRENT_ANALYSES must be a valid number")?,
            user_agent: env::var("USER_AGENT")
                .unwrap_or_else(|_| "EthicsDetector/1.0".to_string()),
            scraping_timeout: env::var("SCRAPING_TIMEOUT")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("SCRAPING_TIMEOUT must be a valid number of seconds")?,
            max_page_size: env::var("MAX_PAGE_SIZE")
                .unwrap_or_else(|_| (5 * 1024 * 1024).to_string())
                .parse()
                .context("MAX_PAGE_SIZE must be a valid number of bytes")?,
        })
    }
}

/// Split a comma-separated variable into trimmed, non-empty values.
fn csv_values(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}
