//! Repository for the `place_types` table.

use camara_core::types::DbId;
use sqlx::PgPool;

use crate::models::place_type::{CreatePlaceType, PlaceType, UpdatePlaceType};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, max_capacity, price_per_hour, \
    is_active, created_at, updated_at";

/// Provides CRUD operations for place types. There is no delete: types are
/// deactivated instead.
pub struct PlaceTypeRepo;

impl PlaceTypeRepo {
    /// Insert a new, active place type.
    pub async fn create(pool: &PgPool, input: &CreatePlaceType) -> Result<PlaceType, sqlx::Error> {
        let query = format!(
            "INSERT INTO place_types (name, description, max_capacity, price_per_hour)
             VALUES ($1, COALESCE($2, ''), $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlaceType>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.max_capacity)
            .bind(input.price_per_hour)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PlaceType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM place_types WHERE id = $1");
        sqlx::query_as::<_, PlaceType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All place types, active or not, ordered by name.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<PlaceType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM place_types ORDER BY name ASC, id ASC");
        sqlx::query_as::<_, PlaceType>(&query).fetch_all(pool).await
    }

    /// Update a place type. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePlaceType,
    ) -> Result<Option<PlaceType>, sqlx::Error> {
        let query = format!(
            "UPDATE place_types SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                max_capacity = COALESCE($4, max_capacity),
                price_per_hour = COALESCE($5, price_per_hour),
                is_active = COALESCE($6, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlaceType>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.max_capacity)
            .bind(input.price_per_hour)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }
}
