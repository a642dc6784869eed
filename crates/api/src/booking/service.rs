//! Reservation workflow service.
//!
//! Coordinates the place catalog, the pure validator and the lifecycle state
//! machine. Held in [`AppState`](crate::state::AppState) as an
//! `Arc<BookingService>`.
//!
//! Each write runs in one transaction:
//! 1. Lock the row that serializes the operation (`FOR UPDATE`).
//! 2. Load the blocking reservations that overlap the interval.
//! 3. Run the validator or lifecycle transition.
//! 4. Insert or update, then commit.
//! 5. Record the audit entry (never fails the request).
//!
//! The `ex_reservations_no_overlap` constraint backs step 2 against any
//! writer that bypasses this service.

use std::sync::Arc;

use camara_core::audit::{actions, subjects};
use camara_core::booking::lifecycle;
use camara_core::booking::pricing::{cost_total, duration_hours};
use camara_core::booking::validator::{self, check_conflict, check_interval};
use camara_core::booking::{
    BookedSlot, BookingError, BookingRules, Candidate, LifecycleState, ReservationStatus,
    ValidationMode,
};
use camara_core::error::CoreError;
use camara_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use camara_core::types::{DbId, Timestamp};
use camara_db::models::reservation::{
    CreateReservation, ReservationFilter, ReservationResponse, ReservationWithPlace,
};
use camara_db::repositories::reservation_repo::is_overlap_violation;
use camara_db::repositories::{PlaceRepo, ReservationRepo};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::identity::MembershipDirectory;
use crate::middleware::auth::AuthUser;

/// What a requester asks for.
#[derive(Debug, Clone)]
pub struct ReservationIntent {
    pub place_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub purpose: String,
    pub description: Option<String>,
    pub party_size: i32,
}

/// Derived duration and cost for a place and interval, without reserving.
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub place_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub price_per_hour: Decimal,
    pub duration_hours: Decimal,
    pub cost_total: Decimal,
}

/// Orchestrates reservation requests and staff decisions.
pub struct BookingService {
    pool: PgPool,
    rules: BookingRules,
    directory: Arc<dyn MembershipDirectory>,
}

impl BookingService {
    pub fn new(
        pool: PgPool,
        rules: BookingRules,
        directory: Arc<dyn MembershipDirectory>,
    ) -> Self {
        Self {
            pool,
            rules,
            directory,
        }
    }

    // -----------------------------------------------------------------------
    // Member operations
    // -----------------------------------------------------------------------

    /// Request a reservation. It starts `pending` and holds its slot.
    ///
    /// Only members (or staff) may request. The place row stays locked from
    /// the conflict query until commit, so two requests for the same place
    /// cannot both pass rule 7.
    pub async fn create_reservation(
        &self,
        requester: &AuthUser,
        intent: &ReservationIntent,
        now: Timestamp,
    ) -> AppResult<ReservationResponse> {
        self.ensure_member(requester).await?;
        validator::validate_request_details(&intent.purpose, intent.party_size)
            .map_err(CoreError::Validation)?;

        let mut tx = self.pool.begin().await?;

        let place = PlaceRepo::lock_for_booking(&mut *tx, intent.place_id)
            .await?
            .filter(|p| p.is_bookable())
            .ok_or(CoreError::NotFound {
                entity: "Place",
                id: intent.place_id,
            })?;

        let existing =
            blocking_slots(&mut *tx, place.id, intent.start_time, intent.end_time, None).await?;
        let candidate = Candidate {
            start_time: intent.start_time,
            end_time: intent.end_time,
            party_size: intent.party_size,
            max_capacity: place.max_capacity,
        };
        validator::validate(
            &self.rules,
            &candidate,
            &existing,
            now,
            ValidationMode::NewRequest,
            None,
        )?;

        let input = CreateReservation {
            requester_id: requester.user_id,
            place_id: place.id,
            start_time: intent.start_time,
            end_time: intent.end_time,
            purpose: intent.purpose.trim().to_string(),
            description: intent.description.clone(),
            party_size: intent.party_size,
        };
        let reservation = ReservationRepo::insert(&mut *tx, &input, now)
            .await
            .map_err(slot_taken)?;
        tx.commit().await?;

        tracing::info!(
            reservation_id = reservation.id,
            user_id = requester.user_id,
            place_id = place.id,
            "Reservation requested"
        );
        audit::record(
            &self.pool,
            requester.user_id,
            actions::RESERVATION_CREATE,
            subjects::RESERVATION,
            reservation.id,
        )
        .await;

        Ok(ReservationWithPlace::new(reservation, place.name, place.price_per_hour).into())
    }

    /// Whether `[start, end)` is free at `place_id`. Only the interval and
    /// overlap rules apply; an invalid interval is an error, not `false`.
    pub async fn check_availability(
        &self,
        place_id: DbId,
        start: Timestamp,
        end: Timestamp,
    ) -> AppResult<bool> {
        PlaceRepo::find_by_id(&self.pool, place_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Place",
                id: place_id,
            })?;
        check_interval(start, end)?;

        let existing = blocking_slots(&self.pool, place_id, start, end, None).await?;
        match validator::check_availability(&existing, start, end) {
            Ok(()) => Ok(true),
            Err(BookingError::SlotUnavailable { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Price a bookable place for `[start, end)` without reserving it.
    pub async fn quote(
        &self,
        place_id: DbId,
        start: Timestamp,
        end: Timestamp,
    ) -> AppResult<Quote> {
        let place = PlaceRepo::find_bookable(&self.pool, place_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Place",
                id: place_id,
            })?;
        check_interval(start, end)?;

        Ok(Quote {
            place_id,
            start_time: start,
            end_time: end,
            price_per_hour: place.price_per_hour,
            duration_hours: duration_hours(start, end),
            cost_total: cost_total(start, end, place.price_per_hour),
        })
    }

    /// The requester's reservations, latest start first.
    pub async fn list_my_reservations(
        &self,
        requester: &AuthUser,
    ) -> AppResult<Vec<ReservationResponse>> {
        let rows = ReservationRepo::list_for_requester(&self.pool, requester.user_id).await?;
        Ok(rows.into_iter().map(ReservationResponse::from).collect())
    }

    /// A reservation visible to its requester or to staff. Anyone else gets
    /// `NotFound`, so ids of other members' reservations are not revealed.
    pub async fn get_reservation(
        &self,
        user: &AuthUser,
        id: DbId,
    ) -> AppResult<ReservationResponse> {
        let row = ReservationRepo::find_with_place(&self.pool, id)
            .await?
            .filter(|r| user.is_staff() || r.requester_id == user.user_id)
            .ok_or(CoreError::NotFound {
                entity: "Reservation",
                id,
            })?;
        Ok(row.into())
    }

    /// `pending | approved -> cancelled`, by the requester or staff.
    pub async fn cancel(
        &self,
        user: &AuthUser,
        id: DbId,
        now: Timestamp,
    ) -> AppResult<ReservationResponse> {
        let actor = user.actor();
        let visible_to = (!actor.is_staff).then_some(actor.user_id);
        self.transition(id, visible_to, None, |state| lifecycle::cancel(state, &actor, now))
            .await?;

        tracing::info!(reservation_id = id, user_id = user.user_id, "Reservation cancelled");
        audit::record(
            &self.pool,
            user.user_id,
            actions::RESERVATION_CANCEL,
            subjects::RESERVATION,
            id,
        )
        .await;
        self.load_response(id).await
    }

    // -----------------------------------------------------------------------
    // Staff operations
    // -----------------------------------------------------------------------

    /// `pending -> approved`. Rule 7 is re-checked against the place's other
    /// blocking reservations under the place lock before the status flips.
    pub async fn approve(
        &self,
        staff: &AuthUser,
        id: DbId,
        admin_notes: Option<&str>,
        now: Timestamp,
    ) -> AppResult<ReservationResponse> {
        require_staff(staff)?;

        let mut tx = self.pool.begin().await?;
        let row = ReservationRepo::lock_by_id(&mut *tx, id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Reservation",
                id,
            })?;
        PlaceRepo::lock_for_booking(&mut *tx, row.place_id).await?;

        let mut state = row.lifecycle_state()?;
        lifecycle::approve(&mut state, staff.user_id, now)?;

        let existing =
            blocking_slots(&mut *tx, row.place_id, row.start_time, row.end_time, Some(id)).await?;
        check_conflict(&existing, row.start_time, row.end_time, Some(id))?;

        ReservationRepo::apply_transition(&mut *tx, id, &state, admin_notes)
            .await
            .map_err(slot_taken)?;
        tx.commit().await?;

        tracing::info!(reservation_id = id, staff_id = staff.user_id, "Reservation approved");
        audit::record(
            &self.pool,
            staff.user_id,
            actions::RESERVATION_APPROVE,
            subjects::RESERVATION,
            id,
        )
        .await;
        self.load_response(id).await
    }

    /// `pending -> rejected`, releasing the slot.
    pub async fn reject(
        &self,
        staff: &AuthUser,
        id: DbId,
        admin_notes: Option<&str>,
        now: Timestamp,
    ) -> AppResult<ReservationResponse> {
        require_staff(staff)?;
        self.transition(id, None, admin_notes, |state| lifecycle::reject(state, now))
            .await?;

        tracing::info!(reservation_id = id, staff_id = staff.user_id, "Reservation rejected");
        audit::record(
            &self.pool,
            staff.user_id,
            actions::RESERVATION_REJECT,
            subjects::RESERVATION,
            id,
        )
        .await;
        self.load_response(id).await
    }

    /// `approved -> completed`, once the reservation has ended.
    pub async fn complete(
        &self,
        staff: &AuthUser,
        id: DbId,
        now: Timestamp,
    ) -> AppResult<ReservationResponse> {
        require_staff(staff)?;
        self.transition(id, None, None, |state| lifecycle::complete(state, now))
            .await?;

        tracing::info!(reservation_id = id, staff_id = staff.user_id, "Reservation completed");
        audit::record(
            &self.pool,
            staff.user_id,
            actions::RESERVATION_COMPLETE,
            subjects::RESERVATION,
            id,
        )
        .await;
        self.load_response(id).await
    }

    /// Staff panel listing, newest request first.
    pub async fn list_for_staff(
        &self,
        staff: &AuthUser,
        filter: &ReservationFilter,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> AppResult<Vec<ReservationResponse>> {
        require_staff(staff)?;
        if let Some(status) = &filter.status {
            status
                .parse::<ReservationStatus>()
                .map_err(CoreError::Validation)?;
        }

        let rows = ReservationRepo::list_filtered(
            &self.pool,
            filter,
            clamp_limit(limit, DEFAULT_LIMIT, MAX_LIMIT),
            clamp_offset(offset),
        )
        .await?;
        Ok(rows.into_iter().map(ReservationResponse::from).collect())
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Staff bypass the membership check.
    async fn ensure_member(&self, user: &AuthUser) -> AppResult<()> {
        if user.is_staff() || self.directory.is_member(user.user_id).await? {
            return Ok(());
        }
        Err(CoreError::Forbidden("Only chamber members may request reservations".into()).into())
    }

    /// Lock a reservation, apply `apply` to its lifecycle state and persist
    /// the result. With `visible_to` set, a reservation owned by someone
    /// else is reported as missing.
    async fn transition<F>(
        &self,
        id: DbId,
        visible_to: Option<DbId>,
        admin_notes: Option<&str>,
        apply: F,
    ) -> AppResult<()>
    where
        F: FnOnce(&mut LifecycleState) -> Result<(), CoreError>,
    {
        let mut tx = self.pool.begin().await?;
        let row = ReservationRepo::lock_by_id(&mut *tx, id)
            .await?
            .filter(|r| visible_to.map_or(true, |owner| r.requester_id == owner))
            .ok_or(CoreError::NotFound {
                entity: "Reservation",
                id,
            })?;

        let mut state = row.lifecycle_state()?;
        apply(&mut state)?;

        ReservationRepo::apply_transition(&mut *tx, id, &state, admin_notes).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn load_response(&self, id: DbId) -> AppResult<ReservationResponse> {
        let row = ReservationRepo::find_with_place(&self.pool, id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Reservation",
                id,
            })?;
        Ok(row.into())
    }
}

fn require_staff(user: &AuthUser) -> AppResult<()> {
    if user.is_staff() {
        Ok(())
    } else {
        Err(CoreError::Forbidden("Staff role required".into()).into())
    }
}

/// Blocking reservations of `place_id` overlapping `[start, end)`.
async fn blocking_slots<'e, E>(
    executor: E,
    place_id: DbId,
    start: Timestamp,
    end: Timestamp,
    excluding_id: Option<DbId>,
) -> AppResult<Vec<BookedSlot>>
where
    E: sqlx::PgExecutor<'e>,
{
    let rows =
        ReservationRepo::list_blocking_overlapping(executor, place_id, start, end, excluding_id)
            .await?;
    let slots = rows
        .iter()
        .map(|r| r.booked_slot())
        .collect::<Result<Vec<_>, CoreError>>()?;
    Ok(slots)
}

/// The exclusion constraint caught an overlap the lock did not.
fn slot_taken(err: sqlx::Error) -> AppError {
    if is_overlap_violation(&err) {
        tracing::warn!("Reservation overlap rejected by database constraint");
        BookingError::SlotUnavailable {
            conflicting_id: None,
        }
        .into()
    } else {
        err.into()
    }
}
