//! Public handlers for browsing bookable places.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use camara_core::types::DbId;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/places
///
/// Bookable places ordered by name, with each type's capacity and hourly
/// price so clients can pre-compute cost.
pub async fn list_places(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let places = state.catalog.list_bookable_places().await?;
    Ok(Json(DataResponse { data: places }))
}

/// GET /api/v1/places/{id}
pub async fn get_place(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let place = state.catalog.get_place(id).await?;
    Ok(Json(DataResponse { data: place }))
}
