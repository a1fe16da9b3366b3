use std::time::Duration;

use paisa_core::ads::PageType;
use paisa_core::carousel::DEFAULT_AUTOPLAY_INTERVAL;
use paisa_core::filters::AdQuery;
use paisa_core::rotation::DEFAULT_MAX_ADS;

/// Default backend location for local development.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080/";

/// Kiosk configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct KioskConfig {
    /// Platform backend base URL.
    pub backend_url: String,
    /// Origin serving `/api/images`, when different from the backend.
    pub image_base_url: Option<String>,
    /// Which page's slots to display.
    pub page_type: PageType,
    /// Location and category filters applied to every fetch.
    pub query: AdQuery,
    /// Per-slot pool cap.
    pub max_ads: usize,
    /// Autoplay cadence.
    pub autoplay: Duration,
    /// How often today's ads are refetched and pools reshuffled.
    pub refresh: Duration,
}

impl KioskConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                  |
    /// |--------------------------|--------------------------|
    /// | `PAISA_BACKEND_URL`      | `http://localhost:8080/` |
    /// | `PAISA_IMAGE_BASE_URL`   | backend URL              |
    /// | `KIOSK_PAGE_TYPE`        | `HOME`                   |
    /// | `KIOSK_CATEGORY_ID`      | unset                    |
    /// | `KIOSK_STATE_ID`         | unset                    |
    /// | `KIOSK_CITY_ID`          | unset                    |
    /// | `STOREFRONT_MAX_ADS`     | `5`                      |
    /// | `STOREFRONT_AUTOPLAY_MS` | `5000`                   |
    /// | `KIOSK_REFRESH_SECS`     | `900`                    |
    pub fn from_env() -> Self {
        let backend_url =
            std::env::var("PAISA_BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.into());
        let image_base_url = std::env::var("PAISA_IMAGE_BASE_URL").ok();

        let page_type: PageType = std::env::var("KIOSK_PAGE_TYPE")
            .unwrap_or_else(|_| "HOME".into())
            .parse()
            .expect("KIOSK_PAGE_TYPE must be HOME or CATEGORY");

        let query = AdQuery {
            category_id: std::env::var("KIOSK_CATEGORY_ID").ok(),
            state_id: std::env::var("KIOSK_STATE_ID").ok(),
            city_id: std::env::var("KIOSK_CITY_ID").ok(),
        }
        .normalized();

        let max_ads: usize = std::env::var("STOREFRONT_MAX_ADS")
            .unwrap_or_else(|_| DEFAULT_MAX_ADS.to_string())
            .parse()
            .expect("STOREFRONT_MAX_ADS must be a valid usize");

        let autoplay_ms: u64 = std::env::var("STOREFRONT_AUTOPLAY_MS")
            .unwrap_or_else(|_| DEFAULT_AUTOPLAY_INTERVAL.as_millis().to_string())
            .parse()
            .expect("STOREFRONT_AUTOPLAY_MS must be a valid u64");

        let refresh_secs: u64 = std::env::var("KIOSK_REFRESH_SECS")
            .unwrap_or_else(|_| "900".into())
            .parse()
            .expect("KIOSK_REFRESH_SECS must be a valid u64");

        Self {
            backend_url,
            image_base_url,
            page_type,
            query,
            max_ads,
            autoplay: Duration::from_millis(autoplay_ms.max(1)),
            refresh: Duration::from_secs(refresh_secs.max(1)),
        }
    }
}
