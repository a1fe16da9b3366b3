//! Handlers for the category filters.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use paisa_core::categories::{children_of, flatten};
use paisa_core::error::CoreError;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories/flat
///
/// The category tree as depth-annotated rows, parents before children.
pub async fn list_flat(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tree = state.source.category_tree().await?;
    Ok(Json(DataResponse {
        data: flatten(&tree),
    }))
}

/// GET /api/v1/categories/{id}/children
///
/// Direct sub-categories of one node, for the next dependent dropdown.
pub async fn list_children(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let tree = state.source.category_tree().await?;
    let children = children_of(&tree, &id)
        .ok_or(CoreError::NotFound {
            entity: "Category",
            id,
        })?
        .to_vec();

    Ok(Json(DataResponse { data: children }))
}
