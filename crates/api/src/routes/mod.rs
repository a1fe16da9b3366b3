pub mod categories;
pub mod health;
pub mod storefront;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /storefront/line-ads                    today's line ads, paginated (gated)
/// /storefront/slots                       every occupied slot of a page
/// /storefront/slots/{slot_key}            a single slot's pool
///
/// /categories/flat                        flattened category tree
/// /categories/{id}/children               direct sub-categories
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/storefront", storefront::router())
        .nest("/categories", categories::router())
}
