//! Route definitions for the storefront.

use axum::routing::get;
use axum::Router;

use crate::handlers::storefront;
use crate::state::AppState;

/// Storefront routes mounted at `/storefront`.
///
/// ```text
/// GET /line-ads            -> list_line_ads
/// GET /slots               -> list_slots
/// GET /slots/{slot_key}    -> get_slot
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/line-ads", get(storefront::list_line_ads))
        .route("/slots", get(storefront::list_slots))
        .route("/slots/{slot_key}", get(storefront::get_slot))
}
