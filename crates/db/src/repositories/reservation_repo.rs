//! Repository for the `reservations` table.
//!
//! Writes take `&mut PgConnection` so the booking service can run the
//! lock, conflict query and insert/update in one transaction.

use camara_core::booking::status::BLOCKING_STATUSES;
use camara_core::booking::LifecycleState;
use camara_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::reservation::{
    CreateReservation, Reservation, ReservationFilter, ReservationWithPlace,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, requester_id, place_id, start_time, end_time, purpose, \
    description, party_size, status, requested_at, updated_at, approved_by, \
    approved_at, admin_notes";

/// Column list for `reservations r JOIN places p JOIN place_types t` queries.
const JOINED_COLUMNS: &str = "r.id, r.requester_id, r.place_id, p.name AS place_name, \
    t.price_per_hour, r.start_time, r.end_time, r.purpose, r.description, r.party_size, \
    r.status, r.requested_at, r.updated_at, r.approved_by, r.approved_at, r.admin_notes";

const FROM_JOINED: &str = "reservations r \
    JOIN places p ON p.id = r.place_id \
    JOIN place_types t ON t.id = p.place_type_id";

/// Name of the exclusion constraint keeping blocking reservations apart.
pub const NO_OVERLAP_CONSTRAINT: &str = "ex_reservations_no_overlap";

/// SQLSTATE for `exclusion_violation`.
const EXCLUSION_VIOLATION: &str = "23P01";

/// Whether `err` is the database rejecting an overlapping blocking
/// reservation. Reached only when a write races past the row lock.
pub fn is_overlap_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(EXCLUSION_VIOLATION)
                && db_err.constraint() == Some(NO_OVERLAP_CONSTRAINT)
        }
        _ => false,
    }
}

fn blocking_statuses() -> Vec<&'static str> {
    BLOCKING_STATUSES.iter().map(|s| s.as_str()).collect()
}

/// Provides booking queries and lifecycle writes for reservations.
pub struct ReservationRepo;

impl ReservationRepo {
    /// Insert a pending reservation stamped with `now`.
    pub async fn insert(
        conn: &mut PgConnection,
        input: &CreateReservation,
        now: Timestamp,
    ) -> Result<Reservation, sqlx::Error> {
        let query = format!(
            "INSERT INTO reservations
                (requester_id, place_id, start_time, end_time, purpose,
                 description, party_size, status, requested_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending', $8, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(input.requester_id)
            .bind(input.place_id)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.purpose)
            .bind(&input.description)
            .bind(input.party_size)
            .bind(now)
            .fetch_one(conn)
            .await
    }

    /// Pending or approved reservations of `place_id` overlapping
    /// `[start, end)`, ignoring `excluding_id`.
    ///
    /// Generic over the executor: availability probes run on the pool,
    /// create and approve run on their transaction.
    pub async fn list_blocking_overlapping<'e, E>(
        executor: E,
        place_id: DbId,
        start: Timestamp,
        end: Timestamp,
        excluding_id: Option<DbId>,
    ) -> Result<Vec<Reservation>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations
             WHERE place_id = $1
               AND status = ANY($2)
               AND start_time < $4
               AND end_time > $3
               AND ($5::BIGINT IS NULL OR id <> $5)
             ORDER BY start_time ASC, id ASC"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(place_id)
            .bind(blocking_statuses())
            .bind(start)
            .bind(end)
            .bind(excluding_id)
            .fetch_all(executor)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reservations WHERE id = $1");
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a reservation with its place name and hourly price.
    pub async fn find_with_place(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ReservationWithPlace>, sqlx::Error> {
        let query = format!("SELECT {JOINED_COLUMNS} FROM {FROM_JOINED} WHERE r.id = $1");
        sqlx::query_as::<_, ReservationWithPlace>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lock a reservation row for the rest of the transaction.
    pub async fn lock_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reservations WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Persist the outcome of a lifecycle transition. `admin_notes` replaces
    /// the stored notes only when given.
    pub async fn apply_transition(
        conn: &mut PgConnection,
        id: DbId,
        state: &LifecycleState,
        admin_notes: Option<&str>,
    ) -> Result<Reservation, sqlx::Error> {
        let query = format!(
            "UPDATE reservations SET
                status = $2,
                approved_by = $3,
                approved_at = $4,
                updated_at = $5,
                admin_notes = COALESCE($6, admin_notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .bind(state.status.as_str())
            .bind(state.approved_by)
            .bind(state.approved_at)
            .bind(state.updated_at)
            .bind(admin_notes)
            .fetch_one(conn)
            .await
    }

    /// A requester's reservations, latest start first.
    pub async fn list_for_requester(
        pool: &PgPool,
        requester_id: DbId,
    ) -> Result<Vec<ReservationWithPlace>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM {FROM_JOINED}
             WHERE r.requester_id = $1
             ORDER BY r.start_time DESC, r.id DESC"
        );
        sqlx::query_as::<_, ReservationWithPlace>(&query)
            .bind(requester_id)
            .fetch_all(pool)
            .await
    }

    /// Staff panel listing, newest request first.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &ReservationFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ReservationWithPlace>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM {FROM_JOINED}
             WHERE ($1::TEXT IS NULL OR r.status = $1)
               AND ($2::BIGINT IS NULL OR r.place_id = $2)
             ORDER BY r.requested_at DESC, r.id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, ReservationWithPlace>(&query)
            .bind(&filter.status)
            .bind(filter.place_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
