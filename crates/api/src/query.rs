//! Query parameter types for the storefront endpoints.
//!
//! Filters are spelled out field by field rather than flattening
//! [`AdQuery`]: `serde(flatten)` routes every value through a string map,
//! which breaks the numeric `page`/`pageSize` fields.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use paisa_core::ads::PageType;
use paisa_core::error::CoreError;
use paisa_core::filters::AdQuery;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::AppError;

/// [`Query`] that rejects unparseable parameters with the JSON error body
/// (`400 BAD_REQUEST`) instead of axum's plain-text rejection.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(ApiQuery(params))
    }
}

/// `?page=&pageSize=&categoryId=&stateId=&cityId=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAdParams {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub category_id: Option<String>,
    pub state_id: Option<String>,
    pub city_id: Option<String>,
}

impl LineAdParams {
    pub fn filter(&self) -> AdQuery {
        AdQuery {
            category_id: self.category_id.clone(),
            state_id: self.state_id.clone(),
            city_id: self.city_id.clone(),
        }
        .normalized()
    }
}

/// `?pageType=&categoryId=&stateId=&cityId=&maxAds=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotParams {
    pub page_type: Option<String>,
    pub max_ads: Option<usize>,
    pub category_id: Option<String>,
    pub state_id: Option<String>,
    pub city_id: Option<String>,
}

impl SlotParams {
    pub fn filter(&self) -> AdQuery {
        AdQuery {
            category_id: self.category_id.clone(),
            state_id: self.state_id.clone(),
            city_id: self.city_id.clone(),
        }
        .normalized()
    }

    /// The requested page family, if any. Blank counts as unset.
    pub fn page_type(&self) -> Result<Option<PageType>, CoreError> {
        match self.page_type.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.to_ascii_uppercase().parse().map(Some),
        }
    }
}
