//! Shopscout: a bounded product-page discovery crawler
//!
//! This crate crawls a small set of e-commerce sites, one seed URL per
//! domain, following only in-domain links and classifying discovered URLs
//! into product pages vs further-crawlable pages.

pub mod config;
pub mod crawler;
pub mod output;
pub mod render;
pub mod url;

use thiserror::Error;

/// Main error type for Shopscout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Render engine error: {0}")]
    Render(#[from] RenderError),

    #[error("Report serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors surfaced by the rendering engine seam
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to launch rendering engine: {0}")]
    Launch(String),

    #[error("Navigation timed out after {timeout_ms}ms for {url}")]
    NavigationTimeout { url: String, timeout_ms: u64 },

    #[error("Page script failed: {0}")]
    Script(String),

    #[error("Engine protocol error: {0}")]
    Protocol(String),
}

/// Result type alias for Shopscout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for rendering engine operations
pub type RenderResult<T> = std::result::Result<T, RenderError>;

// Re-export commonly used types
pub use config::{Config, DomainPolicy};
pub use crawler::Frontier;
pub use output::CrawlReport;
pub use url::{is_in_allowed_domain, is_product_url, normalize_url};
