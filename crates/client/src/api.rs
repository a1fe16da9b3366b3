//! REST API client for the PaisaAds platform backend.
//!
//! Wraps the read-only storefront endpoints (today's ad feeds and the
//! category tree) using [`reqwest`], and builds image URLs without fetching
//! image bytes.

use paisa_core::ads::{Ad, AdKind, AdRecord, LineAd};
use paisa_core::categories::CategoryNode;
use paisa_core::filters::AdQuery;
use reqwest::Url;
use serde::de::DeserializeOwned;

/// Today's text classifieds.
pub const LINE_ADS_TODAY_PATH: &str = "line-ad/today";
/// Today's video ads.
pub const VIDEO_ADS_TODAY_PATH: &str = "video-ad/today";
/// Today's poster ads.
pub const POSTER_ADS_TODAY_PATH: &str = "poster-ad/today";
/// Nested category tree.
pub const CATEGORY_TREE_PATH: &str = "categories/tree";
/// Image proxy; takes the file name in the `imageName` query parameter.
pub const IMAGE_PATH: &str = "api/images";

/// Errors from the backend REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A configured base URL cannot be used.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ApiError {
    /// Whether repeating the same request could plausibly succeed.
    ///
    /// Transport failures and 5xx responses are retryable; 4xx responses and
    /// configuration errors are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(err) => !err.is_decode() && !err.is_builder(),
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::InvalidUrl { .. } => false,
        }
    }
}

/// HTTP client for the platform backend.
#[derive(Debug, Clone)]
pub struct PaisaApi {
    client: reqwest::Client,
    base_url: Url,
    images_url: Url,
}

impl PaisaApi {
    /// Create a client for the backend at `base_url`. Image URLs are built
    /// against the same base.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_client(reqwest::Client::new(), base_url, None)
    }

    /// Create a client reusing an existing [`reqwest::Client`], optionally
    /// serving images from a different origin than the API.
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        image_base_url: Option<&str>,
    ) -> Result<Self, ApiError> {
        let base_url = parse_base_url(base_url)?;
        let image_base = match image_base_url {
            Some(url) => parse_base_url(url)?,
            None => base_url.clone(),
        };
        let images_url = join(&image_base, IMAGE_PATH)?;

        Ok(Self {
            client,
            base_url,
            images_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /line-ad/today`
    pub async fn line_ads_today(&self, query: &AdQuery) -> Result<Vec<LineAd>, ApiError> {
        self.get_list(LINE_ADS_TODAY_PATH, &query.to_query_pairs())
            .await
    }

    /// `GET /video-ad/today`, tagged as [`Ad::Video`].
    pub async fn video_ads_today(&self, query: &AdQuery) -> Result<Vec<Ad>, ApiError> {
        self.slotted_ads(VIDEO_ADS_TODAY_PATH, AdKind::Video, query)
            .await
    }

    /// `GET /poster-ad/today`, tagged as [`Ad::Poster`].
    pub async fn poster_ads_today(&self, query: &AdQuery) -> Result<Vec<Ad>, ApiError> {
        self.slotted_ads(POSTER_ADS_TODAY_PATH, AdKind::Poster, query)
            .await
    }

    /// `GET /categories/tree`
    pub async fn category_tree(&self) -> Result<Vec<CategoryNode>, ApiError> {
        self.get_list(CATEGORY_TREE_PATH, &[]).await
    }

    /// `{image base}/api/images?imageName=<file_name>`, query-encoded.
    pub fn image_url(&self, file_name: &str) -> String {
        let mut url = self.images_url.clone();
        url.query_pairs_mut().append_pair("imageName", file_name);
        url.into()
    }

    // ---- private helpers ----

    async fn slotted_ads(
        &self,
        path: &str,
        kind: AdKind,
        query: &AdQuery,
    ) -> Result<Vec<Ad>, ApiError> {
        let records: Vec<AdRecord> = self.get_list(path, &query.to_query_pairs()).await?;
        Ok(records
            .into_iter()
            .map(|record| Ad::from_record(kind, record))
            .collect())
    }

    /// Fetch a JSON array, skipping elements that do not decode.
    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, ApiError> {
        let raw: Vec<serde_json::Value> = self.get_json(path, query).await?;
        Ok(decode_records(path, raw))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = join(&self.base_url, path)?;
        tracing::debug!(%url, ?query, "Backend request");

        let response = self.client.get(url).query(query).send().await?;
        Self::parse_response(response).await
    }

    /// Ensure the response has a success status code, or return a
    /// [`ApiError::Status`] carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Decode each element on its own so one broken record (say, one without an
/// id) costs only that record.
pub fn decode_records<T: DeserializeOwned>(path: &str, raw: Vec<serde_json::Value>) -> Vec<T> {
    let total = raw.len();
    let records: Vec<T> = raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::debug!(path, error = %err, "Skipping undecodable record");
                None
            }
        })
        .collect();

    let skipped = total - records.len();
    if skipped > 0 {
        tracing::warn!(path, skipped, total, "Backend list contained undecodable records");
    }
    records
}

/// Parse an http(s) base URL and make sure relative joins append to it.
fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let invalid = |reason: String| ApiError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn join(base: &Url, path: &str) -> Result<Url, ApiError> {
    base.join(path).map_err(|e| ApiError::InvalidUrl {
        url: format!("{base}{path}"),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn base_url_gains_trailing_slash() {
        let api = PaisaApi::new("http://backend.local/v1").unwrap();
        assert_eq!(api.base_url().as_str(), "http://backend.local/v1/");
        assert_eq!(
            join(api.base_url(), LINE_ADS_TODAY_PATH).unwrap().as_str(),
            "http://backend.local/v1/line-ad/today"
        );
    }

    #[test]
    fn non_http_base_is_rejected() {
        assert_matches!(
            PaisaApi::new("ftp://backend.local"),
            Err(ApiError::InvalidUrl { .. })
        );
        assert_matches!(PaisaApi::new("not a url"), Err(ApiError::InvalidUrl { .. }));
    }

    #[test]
    fn image_url_encodes_file_name() {
        let api = PaisaApi::new("http://backend.local").unwrap();
        assert_eq!(
            api.image_url("summer sale&1.png"),
            "http://backend.local/api/images?imageName=summer+sale%261.png"
        );
    }

    #[test]
    fn image_url_can_use_separate_origin() {
        let api = PaisaApi::with_client(
            reqwest::Client::new(),
            "http://backend.local/",
            Some("https://www.paisaads.in"),
        )
        .unwrap();
        assert_eq!(
            api.image_url("a.png"),
            "https://www.paisaads.in/api/images?imageName=a.png"
        );
    }

    #[test]
    fn undecodable_records_are_skipped_individually() {
        let raw = vec![
            serde_json::json!({ "id": "a1", "image": { "fileName": "a.png" } }),
            serde_json::json!({ "image": "no id here" }),
            serde_json::json!("not an object"),
            serde_json::json!({ "id": 7, "image": null, "updatedAt": "" }),
        ];
        let records: Vec<AdRecord> = decode_records(POSTER_ADS_TODAY_PATH, raw);
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "7"]);
        assert!(records[1].image.is_none());
    }

    #[test]
    fn server_errors_are_retryable_client_errors_are_not() {
        let server = ApiError::Status {
            status: 503,
            body: String::new(),
        };
        let client = ApiError::Status {
            status: 404,
            body: String::new(),
        };
        assert!(server.is_retryable());
        assert!(!client.is_retryable());
    }
}
