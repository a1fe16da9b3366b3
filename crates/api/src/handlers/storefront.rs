//! Handlers for the storefront: today's line-ad feed and the slot board.
//!
//! Slot pools are shuffled per request, so two clients (or two reloads)
//! see independent rotations. Nothing is cached between requests.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use paisa_client::source::AdSource;
use paisa_core::ads::{Ad, LineAd, PageType};
use paisa_core::images::{ImageSource, MediaSource};
use paisa_core::ordering::sort_by_recency;
use paisa_core::pagination::{clamp_page_size, paginate_gated, Page, FIRST_PAGE};
use paisa_core::rotation::shuffle_pool;
use paisa_core::slots::{classify_all, SlotKey, SlotLayout};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::Caller;
use crate::query::{ApiQuery, LineAdParams, SlotParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Upper bound on a caller-chosen `maxAds`.
pub const MAX_SLOT_POOL: usize = 20;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

// Response bodies are camelCase throughout, matching the flattened backend
// models.

/// A line ad with its image references resolved to URLs.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAdView {
    #[serde(flatten)]
    pub ad: LineAd,
    pub image_urls: Vec<String>,
}

/// One page of today's line ads.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAdFeed {
    #[serde(flatten)]
    pub page: Page<LineAdView>,
    /// Further pages exist that an anonymous caller may not open.
    pub gated: bool,
    /// Nothing matched the filters; render the empty state, not a spinner.
    pub empty: bool,
}

/// A slotted ad plus what a renderer needs to draw it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAd {
    pub ad: Ad,
    pub media: MediaSource,
    /// `None` means draw the placeholder.
    pub image_url: Option<String>,
}

/// One slot's rotation pool, already shuffled and capped.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotPool {
    pub key: SlotKey,
    pub ads: Vec<SlotAd>,
    /// No ad is booked here; render the sample placeholder.
    pub fallback: bool,
}

/// Every occupied slot of a page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotsResponse {
    pub page_type: Option<PageType>,
    pub max_ads: usize,
    pub autoplay_ms: u64,
    pub slots: Vec<SlotPool>,
    /// No slot is occupied; every region shows its sample placeholder.
    pub empty: bool,
}

// ---------------------------------------------------------------------------
// Line ads
// ---------------------------------------------------------------------------

/// GET /api/v1/storefront/line-ads
///
/// Today's line ads, newest first, one page at a time. Anonymous callers
/// always receive page 1 whatever they request.
pub async fn list_line_ads(
    Caller(auth): Caller,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<LineAdParams>,
) -> AppResult<impl IntoResponse> {
    let filter = params.filter();
    let mut ads = state.source.line_ads_today(&filter).await?;
    sort_by_recency(&mut ads);

    let page_size =
        clamp_page_size(Some(params.page_size.unwrap_or(state.config.storefront.page_size)));
    let requested = params.page.unwrap_or(FIRST_PAGE);
    let page = paginate_gated(&ads, page_size, requested, &auth);

    let gated = !auth.is_authenticated() && page.has_next();
    let empty = page.is_empty();
    if gated && requested > FIRST_PAGE {
        tracing::debug!(requested, "Anonymous caller held to the first page");
    }

    let source = state.source.as_ref();
    let page = Page {
        items: page
            .items
            .into_iter()
            .map(|ad| line_ad_view(ad, source))
            .collect(),
        page_number: page.page_number,
        page_size: page.page_size,
        total_pages: page.total_pages,
        total_items: page.total_items,
    };

    Ok(Json(DataResponse {
        data: LineAdFeed { page, gated, empty },
    }))
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// GET /api/v1/storefront/slots
///
/// Resolve every occupied slot of a page for today's video and poster ads.
pub async fn list_slots(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SlotParams>,
) -> AppResult<impl IntoResponse> {
    let page_type = params.page_type()?;
    let max_ads = max_ads(&params, &state);

    let ads = state.source.slotted_ads_today(&params.filter()).await?;
    let layout = classify_all(&ads, page_type);
    tracing::debug!(ads = ads.len(), slots = layout.len(), "Resolved slot layout");

    let slots = resolve_pools(layout, max_ads, state.source.as_ref());

    Ok(Json(DataResponse {
        data: SlotsResponse {
            page_type,
            max_ads,
            autoplay_ms: state.config.storefront.autoplay_ms,
            empty: slots.is_empty(),
            slots,
        },
    }))
}

/// GET /api/v1/storefront/slots/{slot_key}
///
/// A single slot's pool. An unoccupied slot answers with an empty pool and
/// `fallback: true`, not 404.
pub async fn get_slot(
    State(state): State<AppState>,
    Path(slot_key): Path<String>,
    ApiQuery(params): ApiQuery<SlotParams>,
) -> AppResult<impl IntoResponse> {
    let key: SlotKey = slot_key.parse()?;
    let page_type = params.page_type()?;
    let max_ads = max_ads(&params, &state);

    let ads = state.source.slotted_ads_today(&params.filter()).await?;
    let candidates = classify_all(&ads, page_type).get(&key).to_vec();

    let pool = slot_pool(key, candidates, max_ads, state.source.as_ref());

    Ok(Json(DataResponse { data: pool }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn max_ads(params: &SlotParams, state: &AppState) -> usize {
    params
        .max_ads
        .unwrap_or(state.config.storefront.max_ads)
        .clamp(1, MAX_SLOT_POOL)
}

/// Shuffle and cap every slot. Kept synchronous so the thread-local RNG
/// never lives across an await point.
fn resolve_pools(layout: SlotLayout, max_ads: usize, source: &dyn AdSource) -> Vec<SlotPool> {
    layout
        .into_inner()
        .into_iter()
        .map(|(key, candidates)| slot_pool(key, candidates, max_ads, source))
        .collect()
}

fn slot_pool(key: SlotKey, candidates: Vec<Ad>, max_ads: usize, source: &dyn AdSource) -> SlotPool {
    if candidates.is_empty() {
        return SlotPool {
            key,
            ads: Vec::new(),
            fallback: true,
        };
    }

    let ads = shuffle_pool(candidates, max_ads, &mut rand::rng())
        .into_iter()
        .map(|ad| {
            let media = MediaSource::for_ad(&ad);
            let image_url = media.image.file_name().map(|name| source.image_url(name));
            SlotAd {
                ad,
                media,
                image_url,
            }
        })
        .collect();

    SlotPool {
        key,
        ads,
        fallback: false,
    }
}

fn line_ad_view(ad: LineAd, source: &dyn AdSource) -> LineAdView {
    let image_urls = ad
        .images
        .iter()
        .filter_map(|image| {
            ImageSource::resolve(Some(image))
                .file_name()
                .map(|name| source.image_url(name))
        })
        .collect();
    LineAdView { ad, image_urls }
}
