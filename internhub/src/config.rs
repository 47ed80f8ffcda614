//! Server configuration

use internhub_store::CacheConfig;
use std::time::Duration;

/// Configuration for the API server
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    /// External scoring service endpoint
    pub model_url: String,
    /// Timeout for the external scoring call
    pub model_timeout: Duration,
    pub cache: CacheConfig,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ApiServerConfig {
    /// Read configuration from the environment, with development defaults
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);
        let jwt_secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| "changeme_secret".to_string());
        let model_url = std::env::var("MODEL_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8000/recommend".to_string());
        let model_timeout = std::env::var("MODEL_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(8));

        Self {
            host,
            port,
            jwt_secret,
            model_url,
            model_timeout,
            cache: CacheConfig::default(),
        }
    }
}
