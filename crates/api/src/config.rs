use paisa_core::carousel::DEFAULT_AUTOPLAY_INTERVAL;
use paisa_core::pagination::DEFAULT_PAGE_SIZE;
use paisa_core::rotation::DEFAULT_MAX_ADS;

use crate::auth::jwt::JwtConfig;

/// Backend used when `PAISA_BACKEND_URL` is unset.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080/";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development except
/// the JWT secret. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Base URL of the platform backend the ad feeds are read from.
    pub backend_url: String,
    /// Origin serving `/api/images`, when different from the backend.
    pub image_base_url: Option<String>,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Storefront presentation defaults.
    pub storefront: StorefrontConfig,
}

/// Defaults applied when a storefront request does not choose for itself.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Line ads per page.
    pub page_size: usize,
    /// Cap on each slot's rotation pool.
    pub max_ads: usize,
    /// Autoplay interval advertised to clients, in milliseconds.
    pub autoplay_ms: u64,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_ads: DEFAULT_MAX_ADS,
            autoplay_ms: DEFAULT_AUTOPLAY_INTERVAL.as_millis() as u64,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `3000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `PAISA_BACKEND_URL`      | `http://localhost:8080/`   |
    /// | `PAISA_IMAGE_BASE_URL`   | backend URL                |
    /// | `STOREFRONT_PAGE_SIZE`   | `12`                       |
    /// | `STOREFRONT_MAX_ADS`     | `5`                        |
    /// | `STOREFRONT_AUTOPLAY_MS` | `5000`                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let backend_url =
            std::env::var("PAISA_BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.into());

        let image_base_url = std::env::var("PAISA_IMAGE_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let defaults = StorefrontConfig::default();
        let storefront = StorefrontConfig {
            page_size: std::env::var("STOREFRONT_PAGE_SIZE")
                .map(|v| v.parse().expect("STOREFRONT_PAGE_SIZE must be a valid usize"))
                .unwrap_or(defaults.page_size),
            max_ads: std::env::var("STOREFRONT_MAX_ADS")
                .map(|v| v.parse().expect("STOREFRONT_MAX_ADS must be a valid usize"))
                .unwrap_or(defaults.max_ads),
            autoplay_ms: std::env::var("STOREFRONT_AUTOPLAY_MS")
                .map(|v| v.parse().expect("STOREFRONT_AUTOPLAY_MS must be a valid u64"))
                .unwrap_or(defaults.autoplay_ms),
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            backend_url,
            image_base_url,
            jwt,
            storefront,
        }
    }
}
