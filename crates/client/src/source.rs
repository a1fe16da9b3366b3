//! Abstraction over where storefront ad data comes from.
//!
//! The storefront API and the kiosk depend on [`AdSource`] rather than on
//! [`PaisaApi`] directly so tests can substitute canned data.

use async_trait::async_trait;
use paisa_core::ads::{Ad, LineAd};
use paisa_core::categories::CategoryNode;
use paisa_core::filters::AdQuery;

use crate::api::{ApiError, PaisaApi};

#[async_trait]
pub trait AdSource: Send + Sync {
    async fn line_ads_today(&self, query: &AdQuery) -> Result<Vec<LineAd>, ApiError>;

    async fn video_ads_today(&self, query: &AdQuery) -> Result<Vec<Ad>, ApiError>;

    async fn poster_ads_today(&self, query: &AdQuery) -> Result<Vec<Ad>, ApiError>;

    async fn category_tree(&self) -> Result<Vec<CategoryNode>, ApiError>;

    /// Public URL for an image file name.
    fn image_url(&self, file_name: &str) -> String;

    /// Video and poster ads for the same query, fetched concurrently.
    /// Either request failing fails the whole fetch.
    async fn slotted_ads_today(&self, query: &AdQuery) -> Result<Vec<Ad>, ApiError> {
        let (mut videos, posters) = futures::try_join!(
            self.video_ads_today(query),
            self.poster_ads_today(query)
        )?;
        videos.extend(posters);
        Ok(videos)
    }
}

#[async_trait]
impl AdSource for PaisaApi {
    async fn line_ads_today(&self, query: &AdQuery) -> Result<Vec<LineAd>, ApiError> {
        PaisaApi::line_ads_today(self, query).await
    }

    async fn video_ads_today(&self, query: &AdQuery) -> Result<Vec<Ad>, ApiError> {
        PaisaApi::video_ads_today(self, query).await
    }

    async fn poster_ads_today(&self, query: &AdQuery) -> Result<Vec<Ad>, ApiError> {
        PaisaApi::poster_ads_today(self, query).await
    }

    async fn category_tree(&self) -> Result<Vec<CategoryNode>, ApiError> {
        PaisaApi::category_tree(self).await
    }

    fn image_url(&self, file_name: &str) -> String {
        PaisaApi::image_url(self, file_name)
    }
}
