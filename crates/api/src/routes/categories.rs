use axum::routing::get;
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Category routes mounted at `/categories`.
///
/// ```text
/// GET /flat             -> list_flat
/// GET /{id}/children    -> list_children
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/flat", get(categories::list_flat))
        .route("/{id}/children", get(categories::list_children))
}
