//! Staff panel handlers: reservation queue and catalog maintenance.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use camara_core::types::DbId;
use camara_db::models::place::{CreatePlace, UpdatePlace};
use camara_db::models::place_type::{CreatePlaceType, UpdatePlaceType};
use camara_db::models::reservation::ReservationFilter;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /admin/reservations`.
#[derive(Debug, Deserialize)]
pub struct ReservationPanelParams {
    pub status: Option<String>,
    pub place_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/admin/reservations?status=&place_id=&limit=&offset=
pub async fn list_reservations(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<ReservationPanelParams>,
) -> AppResult<impl IntoResponse> {
    let filter = ReservationFilter {
        status: params.status,
        place_id: params.place_id,
    };
    let reservations = state
        .booking
        .list_for_staff(&staff, &filter, params.limit, params.offset)
        .await?;
    Ok(Json(DataResponse { data: reservations }))
}

// ---------------------------------------------------------------------------
// Place types
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/place-types
pub async fn list_place_types(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let types = state.catalog.list_place_types().await?;
    Ok(Json(DataResponse { data: types }))
}

/// POST /api/v1/admin/place-types
pub async fn create_place_type(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreatePlaceType>,
) -> AppResult<impl IntoResponse> {
    let created = state.catalog.create_place_type(staff.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /api/v1/admin/place-types/{id}
///
/// Partial update; `is_active: false` takes every place of the type out of
/// the bookable listing.
pub async fn update_place_type(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePlaceType>,
) -> AppResult<impl IntoResponse> {
    let updated = state
        .catalog
        .update_place_type(staff.user_id, id, &input)
        .await?;
    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// Places
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/places
pub async fn list_places(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let places = state.catalog.list_all_places().await?;
    Ok(Json(DataResponse { data: places }))
}

/// POST /api/v1/admin/places
pub async fn create_place(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreatePlace>,
) -> AppResult<impl IntoResponse> {
    let created = state.catalog.create_place(staff.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /api/v1/admin/places/{id}
pub async fn update_place(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePlace>,
) -> AppResult<impl IntoResponse> {
    let updated = state.catalog.update_place(staff.user_id, id, &input).await?;
    Ok(Json(DataResponse { data: updated }))
}
