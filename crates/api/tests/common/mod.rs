#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use paisa_api::auth::jwt::{generate_access_token, JwtConfig};
use paisa_api::config::{ServerConfig, StorefrontConfig};
use paisa_api::router::build_app_router;
use paisa_api::state::AppState;
use paisa_client::api::ApiError;
use paisa_client::source::AdSource;
use paisa_core::ads::{Ad, AdKind, AdRecord, LineAd, PageType, Position, Side};
use paisa_core::categories::CategoryNode;
use paisa_core::filters::AdQuery;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        backend_url: "http://backend.test/".to_string(),
        image_base_url: None,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
        storefront: StorefrontConfig::default(),
    }
}

// ---------------------------------------------------------------------------
// Canned ad source
// ---------------------------------------------------------------------------

/// In-memory [`AdSource`] serving fixed data, or a fixed backend status.
#[derive(Default)]
pub struct StubSource {
    pub line_ads: Vec<LineAd>,
    pub ads: Vec<Ad>,
    pub tree: Vec<CategoryNode>,
    /// When set, every fetch fails with this backend status.
    pub fail_with: Option<u16>,
    /// Filters seen by the most recent fetch.
    pub last_query: Mutex<Option<AdQuery>>,
}

impl StubSource {
    fn check(&self, query: Option<&AdQuery>) -> Result<(), ApiError> {
        if let Some(query) = query {
            *self.last_query.lock().unwrap() = Some(query.clone());
        }
        match self.fail_with {
            Some(status) => Err(ApiError::Status {
                status,
                body: "stubbed failure".into(),
            }),
            None => Ok(()),
        }
    }

    fn of_kind(&self, kind: AdKind) -> Vec<Ad> {
        self.ads.iter().filter(|ad| ad.kind() == kind).cloned().collect()
    }
}

#[async_trait]
impl AdSource for StubSource {
    async fn line_ads_today(&self, query: &AdQuery) -> Result<Vec<LineAd>, ApiError> {
        self.check(Some(query))?;
        Ok(self.line_ads.clone())
    }

    async fn video_ads_today(&self, query: &AdQuery) -> Result<Vec<Ad>, ApiError> {
        self.check(Some(query))?;
        Ok(self.of_kind(AdKind::Video))
    }

    async fn poster_ads_today(&self, query: &AdQuery) -> Result<Vec<Ad>, ApiError> {
        self.check(Some(query))?;
        Ok(self.of_kind(AdKind::Poster))
    }

    async fn category_tree(&self) -> Result<Vec<CategoryNode>, ApiError> {
        self.check(None)?;
        Ok(self.tree.clone())
    }

    fn image_url(&self, file_name: &str) -> String {
        format!("http://images.test/api/images?imageName={file_name}")
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn line_ad(id: &str, created_at: &str) -> LineAd {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "content": format!("Classified {id}"),
        "createdAt": created_at,
    }))
    .unwrap()
}

/// Decode a backend-shaped line-ad list the way the client does.
pub fn line_ads_from_json(list: serde_json::Value) -> Vec<LineAd> {
    serde_json::from_value(list).unwrap()
}

/// Decode a backend-shaped `/poster-ad/today` list.
pub fn posters_from_json(list: serde_json::Value) -> Vec<Ad> {
    let records: Vec<AdRecord> = serde_json::from_value(list).unwrap();
    records
        .into_iter()
        .map(|record| Ad::from_record(AdKind::Poster, record))
        .collect()
}

/// `count` line ads created one minute apart; `l{count-1}` is the newest.
pub fn line_ads(count: usize) -> Vec<LineAd> {
    (0..count)
        .map(|i| line_ad(&format!("l{i:02}"), &format!("2026-10-01T08:{i:02}:00Z")))
        .collect()
}

pub fn poster(id: &str, page_type: PageType, side: Side, position: Option<i32>) -> Ad {
    Ad::Poster(AdRecord::new(id).with_position(Position {
        page_type,
        side,
        position,
    }))
}

pub fn video(id: &str, page_type: PageType, side: Side, position: Option<i32>) -> Ad {
    Ad::Video(AdRecord::new(id).with_position(Position {
        page_type,
        side,
        position,
    }))
}

pub fn category(id: &str, name: &str, children: Vec<CategoryNode>) -> CategoryNode {
    CategoryNode {
        id: id.to_string(),
        name: name.to_string(),
        sub_categories: children,
    }
}

pub fn token_for(user_id: &str) -> String {
    generate_access_token(user_id, "USER", &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// App + request helpers
// ---------------------------------------------------------------------------

/// Build the full application router, with all middleware layers, over
/// the given source.
pub fn build_test_app(source: Arc<StubSource>) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        source,
    };
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, authorization: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", authorization)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
