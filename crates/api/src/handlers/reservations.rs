//! Handlers for the reservation workflow.
//!
//! Thin wrappers around [`BookingService`](crate::booking::service::BookingService):
//! extract, validate the body shape, stamp `now`, delegate.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use camara_core::types::{DbId, Timestamp};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_body;
use crate::booking::service::ReservationIntent;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::SlotParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /reservations`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReservationRequest {
    pub place_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    #[validate(length(min = 1, max = 200))]
    pub purpose: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub party_size: i32,
}

impl From<CreateReservationRequest> for ReservationIntent {
    fn from(req: CreateReservationRequest) -> Self {
        Self {
            place_id: req.place_id,
            start_time: req.start_time,
            end_time: req.end_time,
            purpose: req.purpose,
            description: req.description,
            party_size: req.party_size,
        }
    }
}

/// Body of staff approve / reject. May be omitted entirely.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct DecisionRequest {
    #[validate(length(max = 2000))]
    pub admin_notes: Option<String>,
}

/// Availability probe result.
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub place_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub available: bool,
}

/// POST /api/v1/reservations
///
/// Request a reservation. Members only; the new reservation is `pending`.
pub async fn create_reservation(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateReservationRequest>,
) -> AppResult<impl IntoResponse> {
    validate_body(&input)?;
    let reservation = state
        .booking
        .create_reservation(&auth, &input.into(), Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: reservation })))
}

/// GET /api/v1/reservations/availability?place_id=&start_time=&end_time=
pub async fn check_availability(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SlotParams>,
) -> AppResult<impl IntoResponse> {
    let available = state
        .booking
        .check_availability(params.place_id, params.start_time, params.end_time)
        .await?;
    Ok(Json(DataResponse {
        data: AvailabilityResponse {
            place_id: params.place_id,
            start_time: params.start_time,
            end_time: params.end_time,
            available,
        },
    }))
}

/// GET /api/v1/reservations/quote?place_id=&start_time=&end_time=
pub async fn quote(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SlotParams>,
) -> AppResult<impl IntoResponse> {
    let quote = state
        .booking
        .quote(params.place_id, params.start_time, params.end_time)
        .await?;
    Ok(Json(DataResponse { data: quote }))
}

/// GET /api/v1/reservations/mine
pub async fn list_my_reservations(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let reservations = state.booking.list_my_reservations(&auth).await?;
    Ok(Json(DataResponse { data: reservations }))
}

/// GET /api/v1/reservations/{id}
pub async fn get_reservation(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let reservation = state.booking.get_reservation(&auth, id).await?;
    Ok(Json(DataResponse { data: reservation }))
}

/// POST /api/v1/reservations/{id}/cancel
pub async fn cancel_reservation(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let reservation = state.booking.cancel(&auth, id, Utc::now()).await?;
    Ok(Json(DataResponse { data: reservation }))
}

/// POST /api/v1/reservations/{id}/approve
///
/// Staff only. The body is optional; `admin_notes`, when given, are stored
/// on the reservation.
pub async fn approve_reservation(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Option<Json<DecisionRequest>>,
) -> AppResult<impl IntoResponse> {
    let input = body.map(|Json(b)| b).unwrap_or_default();
    validate_body(&input)?;
    let reservation = state
        .booking
        .approve(&staff, id, input.admin_notes.as_deref(), Utc::now())
        .await?;
    Ok(Json(DataResponse { data: reservation }))
}

/// POST /api/v1/reservations/{id}/reject
pub async fn reject_reservation(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Option<Json<DecisionRequest>>,
) -> AppResult<impl IntoResponse> {
    let input = body.map(|Json(b)| b).unwrap_or_default();
    validate_body(&input)?;
    let reservation = state
        .booking
        .reject(&staff, id, input.admin_notes.as_deref(), Utc::now())
        .await?;
    Ok(Json(DataResponse { data: reservation }))
}

/// POST /api/v1/reservations/{id}/complete
pub async fn complete_reservation(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let reservation = state.booking.complete(&staff, id, Utc::now()).await?;
    Ok(Json(DataResponse { data: reservation }))
}
