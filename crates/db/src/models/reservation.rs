//! Reservation entity model, DTOs, and conversions into the core booking
//! types.

use camara_core::booking::pricing::{cost_total, duration_hours};
use camara_core::booking::{BookedSlot, LifecycleState, ReservationStatus};
use camara_core::error::CoreError;
use camara_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `reservations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reservation {
    pub id: DbId,
    pub requester_id: DbId,
    pub place_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub purpose: String,
    pub description: Option<String>,
    pub party_size: i32,
    pub status: String,
    pub requested_at: Timestamp,
    pub updated_at: Timestamp,
    pub approved_by: Option<DbId>,
    pub approved_at: Option<Timestamp>,
    pub admin_notes: Option<String>,
}

impl Reservation {
    /// Parse the stored status text.
    pub fn status(&self) -> Result<ReservationStatus, CoreError> {
        self.status.parse().map_err(|e: String| {
            CoreError::Internal(format!("Reservation {}: {e}", self.id))
        })
    }

    /// The fields lifecycle transitions read and write.
    pub fn lifecycle_state(&self) -> Result<LifecycleState, CoreError> {
        Ok(LifecycleState {
            status: self.status()?,
            requester_id: self.requester_id,
            end_time: self.end_time,
            approved_by: self.approved_by,
            approved_at: self.approved_at,
            updated_at: self.updated_at,
        })
    }

    /// The slot this reservation occupies, for conflict checks.
    pub fn booked_slot(&self) -> Result<BookedSlot, CoreError> {
        Ok(BookedSlot {
            id: self.id,
            start_time: self.start_time,
            end_time: self.end_time,
            status: self.status()?,
        })
    }
}

/// A reservation joined with the place fields needed to derive cost.
#[derive(Debug, Clone, FromRow)]
pub struct ReservationWithPlace {
    pub id: DbId,
    pub requester_id: DbId,
    pub place_id: DbId,
    pub place_name: String,
    pub price_per_hour: Decimal,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub purpose: String,
    pub description: Option<String>,
    pub party_size: i32,
    pub status: String,
    pub requested_at: Timestamp,
    pub updated_at: Timestamp,
    pub approved_by: Option<DbId>,
    pub approved_at: Option<Timestamp>,
    pub admin_notes: Option<String>,
}

impl ReservationWithPlace {
    /// Attach place details to a freshly written row.
    pub fn new(r: Reservation, place_name: String, price_per_hour: Decimal) -> Self {
        Self {
            id: r.id,
            requester_id: r.requester_id,
            place_id: r.place_id,
            place_name,
            price_per_hour,
            start_time: r.start_time,
            end_time: r.end_time,
            purpose: r.purpose,
            description: r.description,
            party_size: r.party_size,
            status: r.status,
            requested_at: r.requested_at,
            updated_at: r.updated_at,
            approved_by: r.approved_by,
            approved_at: r.approved_at,
            admin_notes: r.admin_notes,
        }
    }
}

/// API representation of a reservation with derived duration and cost.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationResponse {
    pub id: DbId,
    pub requester_id: DbId,
    pub place_id: DbId,
    pub place_name: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub purpose: String,
    pub description: Option<String>,
    pub party_size: i32,
    pub status: String,
    pub requested_at: Timestamp,
    pub updated_at: Timestamp,
    pub approved_by: Option<DbId>,
    pub approved_at: Option<Timestamp>,
    pub admin_notes: Option<String>,
    pub duration_hours: Decimal,
    pub cost_total: Decimal,
}

impl From<ReservationWithPlace> for ReservationResponse {
    fn from(r: ReservationWithPlace) -> Self {
        Self {
            duration_hours: duration_hours(r.start_time, r.end_time),
            cost_total: cost_total(r.start_time, r.end_time, r.price_per_hour),
            id: r.id,
            requester_id: r.requester_id,
            place_id: r.place_id,
            place_name: r.place_name,
            start_time: r.start_time,
            end_time: r.end_time,
            purpose: r.purpose,
            description: r.description,
            party_size: r.party_size,
            status: r.status,
            requested_at: r.requested_at,
            updated_at: r.updated_at,
            approved_by: r.approved_by,
            approved_at: r.approved_at,
            admin_notes: r.admin_notes,
        }
    }
}

/// DTO for inserting a new pending reservation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReservation {
    pub requester_id: DbId,
    pub place_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub purpose: String,
    pub description: Option<String>,
    pub party_size: i32,
}

/// Filters for the staff reservation panel.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationFilter {
    pub status: Option<String>,
    pub place_id: Option<DbId>,
}
