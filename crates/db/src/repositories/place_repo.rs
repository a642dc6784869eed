//! Repository for the `places` table.
//!
//! Reads return [`PlaceWithType`] so callers see the type's capacity, price
//! and active flag alongside the place.

use camara_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::place::{CreatePlace, Place, PlaceWithType, UpdatePlace};

/// Column list for plain `places` rows.
const COLUMNS: &str = "id, place_type_id, name, location, description, equipment, \
    is_active, created_at, updated_at";

/// Column list for `places p JOIN place_types t` queries.
const JOINED_COLUMNS: &str = "p.id, p.place_type_id, p.name, p.location, p.description, \
    p.equipment, p.is_active, t.name AS type_name, t.is_active AS type_is_active, \
    t.max_capacity, t.price_per_hour, p.created_at, p.updated_at";

const FROM_JOINED: &str = "places p JOIN place_types t ON t.id = p.place_type_id";

/// Provides CRUD and booking lookups for places. There is no delete: places
/// with reservations are deactivated instead.
pub struct PlaceRepo;

impl PlaceRepo {
    /// Insert a new, active place.
    pub async fn create(pool: &PgPool, input: &CreatePlace) -> Result<Place, sqlx::Error> {
        let query = format!(
            "INSERT INTO places (place_type_id, name, location, description, equipment)
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, ''), COALESCE($5, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Place>(&query)
            .bind(input.place_type_id)
            .bind(&input.name)
            .bind(&input.location)
            .bind(&input.description)
            .bind(&input.equipment)
            .fetch_one(pool)
            .await
    }

    /// Update a place. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePlace,
    ) -> Result<Option<Place>, sqlx::Error> {
        let query = format!(
            "UPDATE places SET
                place_type_id = COALESCE($2, place_type_id),
                name = COALESCE($3, name),
                location = COALESCE($4, location),
                description = COALESCE($5, description),
                equipment = COALESCE($6, equipment),
                is_active = COALESCE($7, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Place>(&query)
            .bind(id)
            .bind(input.place_type_id)
            .bind(&input.name)
            .bind(&input.location)
            .bind(&input.description)
            .bind(&input.equipment)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Find a place by id regardless of active flags.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PlaceWithType>, sqlx::Error> {
        let query = format!("SELECT {JOINED_COLUMNS} FROM {FROM_JOINED} WHERE p.id = $1");
        sqlx::query_as::<_, PlaceWithType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a place by id only if it and its type are both active.
    pub async fn find_bookable(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PlaceWithType>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM {FROM_JOINED}
             WHERE p.id = $1 AND p.is_active AND t.is_active"
        );
        sqlx::query_as::<_, PlaceWithType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Bookable places ordered by name.
    pub async fn list_bookable(pool: &PgPool) -> Result<Vec<PlaceWithType>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM {FROM_JOINED}
             WHERE p.is_active AND t.is_active
             ORDER BY p.name ASC, p.id ASC"
        );
        sqlx::query_as::<_, PlaceWithType>(&query).fetch_all(pool).await
    }

    /// Every place, including inactive ones, for the staff panel.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<PlaceWithType>, sqlx::Error> {
        let query =
            format!("SELECT {JOINED_COLUMNS} FROM {FROM_JOINED} ORDER BY p.name ASC, p.id ASC");
        sqlx::query_as::<_, PlaceWithType>(&query).fetch_all(pool).await
    }

    /// Lock the place row for the rest of the transaction, returning it with
    /// its type. Serializes concurrent bookings of the same place.
    pub async fn lock_for_booking(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<PlaceWithType>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM {FROM_JOINED}
             WHERE p.id = $1
             FOR UPDATE OF p"
        );
        sqlx::query_as::<_, PlaceWithType>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }
}
