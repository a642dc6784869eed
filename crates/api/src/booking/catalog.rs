//! Place catalog service: public bookable listings and staff maintenance of
//! place types and places.

use camara_core::audit::{actions, subjects};
use camara_core::catalog::{validate_name, validate_place_type};
use camara_core::error::CoreError;
use camara_core::types::DbId;
use camara_db::models::place::{CreatePlace, Place, PlaceWithType, UpdatePlace};
use camara_db::models::place_type::{CreatePlaceType, PlaceType, UpdatePlaceType};
use camara_db::repositories::{PlaceRepo, PlaceTypeRepo};
use sqlx::PgPool;

use crate::audit;
use crate::error::AppResult;

/// Read and maintain the place catalog.
pub struct PlaceCatalog {
    pool: PgPool,
}

impl PlaceCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active places of active types, ordered by name.
    pub async fn list_bookable_places(&self) -> AppResult<Vec<PlaceWithType>> {
        Ok(PlaceRepo::list_bookable(&self.pool).await?)
    }

    /// A bookable place. Inactive places are reported as missing.
    pub async fn get_place(&self, id: DbId) -> AppResult<PlaceWithType> {
        PlaceRepo::find_bookable(&self.pool, id)
            .await?
            .ok_or_else(|| CoreError::NotFound { entity: "Place", id }.into())
    }

    // -----------------------------------------------------------------------
    // Staff maintenance
    // -----------------------------------------------------------------------

    pub async fn list_place_types(&self) -> AppResult<Vec<PlaceType>> {
        Ok(PlaceTypeRepo::list_all(&self.pool).await?)
    }

    pub async fn create_place_type(
        &self,
        staff_id: DbId,
        input: &CreatePlaceType,
    ) -> AppResult<PlaceType> {
        validate_place_type(&input.name, input.max_capacity, input.price_per_hour)
            .map_err(CoreError::Validation)?;

        let created = PlaceTypeRepo::create(&self.pool, input).await?;
        tracing::info!(place_type_id = created.id, staff_id, "Place type created");
        audit::record(
            &self.pool,
            staff_id,
            actions::PLACE_TYPE_CREATE,
            subjects::PLACE_TYPE,
            created.id,
        )
        .await;
        Ok(created)
    }

    /// Apply a partial update, validating the merged result.
    pub async fn update_place_type(
        &self,
        staff_id: DbId,
        id: DbId,
        input: &UpdatePlaceType,
    ) -> AppResult<PlaceType> {
        let current = PlaceTypeRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(CoreError::NotFound { entity: "PlaceType", id })?;

        validate_place_type(
            input.name.as_deref().unwrap_or(&current.name),
            input.max_capacity.unwrap_or(current.max_capacity),
            input.price_per_hour.unwrap_or(current.price_per_hour),
        )
        .map_err(CoreError::Validation)?;

        let updated = PlaceTypeRepo::update(&self.pool, id, input)
            .await?
            .ok_or(CoreError::NotFound { entity: "PlaceType", id })?;
        tracing::info!(
            place_type_id = id,
            staff_id,
            is_active = updated.is_active,
            "Place type updated"
        );
        audit::record(
            &self.pool,
            staff_id,
            actions::PLACE_TYPE_UPDATE,
            subjects::PLACE_TYPE,
            id,
        )
        .await;
        Ok(updated)
    }

    /// Every place, including inactive ones.
    pub async fn list_all_places(&self) -> AppResult<Vec<PlaceWithType>> {
        Ok(PlaceRepo::list_all(&self.pool).await?)
    }

    pub async fn create_place(&self, staff_id: DbId, input: &CreatePlace) -> AppResult<Place> {
        validate_name(&input.name).map_err(CoreError::Validation)?;
        self.ensure_place_type_exists(input.place_type_id).await?;

        let created = PlaceRepo::create(&self.pool, input).await?;
        tracing::info!(place_id = created.id, staff_id, "Place created");
        audit::record(
            &self.pool,
            staff_id,
            actions::PLACE_CREATE,
            subjects::PLACE,
            created.id,
        )
        .await;
        Ok(created)
    }

    /// Apply a partial update. Deactivating a place keeps its reservations.
    pub async fn update_place(
        &self,
        staff_id: DbId,
        id: DbId,
        input: &UpdatePlace,
    ) -> AppResult<Place> {
        if let Some(name) = &input.name {
            validate_name(name).map_err(CoreError::Validation)?;
        }
        if let Some(place_type_id) = input.place_type_id {
            self.ensure_place_type_exists(place_type_id).await?;
        }

        let updated = PlaceRepo::update(&self.pool, id, input)
            .await?
            .ok_or(CoreError::NotFound { entity: "Place", id })?;
        tracing::info!(place_id = id, staff_id, is_active = updated.is_active, "Place updated");
        audit::record(&self.pool, staff_id, actions::PLACE_UPDATE, subjects::PLACE, id).await;
        Ok(updated)
    }

    async fn ensure_place_type_exists(&self, id: DbId) -> AppResult<()> {
        PlaceTypeRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(CoreError::NotFound { entity: "PlaceType", id })?;
        Ok(())
    }
}
