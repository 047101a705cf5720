use serde::Deserialize;

use estate_core::config::Config;

/// Marketplace service configuration loaded from environment variables.
#[derive(Deserialize)]
pub struct MarketplaceConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing access tokens.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 5000).
    #[serde(default = "default_port")]
    pub port: u16,
    pub cloudinary_cloud_name: String,
    pub cloudinary_api_key: String,
    pub cloudinary_api_secret: String,
    /// Image store API root (default `https://api.cloudinary.com/v1_1`).
    #[serde(default = "default_media_base_url")]
    pub media_base_url: String,
    /// Comma-separated allowed origins; `*` allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
    /// Request body limit in bytes. Bodies carry base64 images (default 25 MiB).
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Config for MarketplaceConfig {}

fn default_port() -> u16 {
    5000
}

fn default_media_base_url() -> String {
    "https://api.cloudinary.com/v1_1".to_owned()
}

fn default_cors_origins() -> String {
    "*".to_owned()
}

fn default_max_body_bytes() -> usize {
    25 * 1024 * 1024
}

impl MarketplaceConfig {
    /// Explicit origin list, or `None` when any origin is allowed.
    pub fn allowed_origins(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .cors_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_owned)
            .collect();
        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            None
        } else {
            Some(origins)
        }
    }
}
