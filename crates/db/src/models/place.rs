//! Place entity model and DTOs.

use camara_core::catalog::is_bookable;
use camara_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `places` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Place {
    pub id: DbId,
    pub place_type_id: DbId,
    pub name: String,
    pub location: String,
    pub description: String,
    pub equipment: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A place joined with the type fields needed for booking and display.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlaceWithType {
    pub id: DbId,
    pub place_type_id: DbId,
    pub name: String,
    pub location: String,
    pub description: String,
    pub equipment: String,
    pub is_active: bool,
    pub type_name: String,
    pub type_is_active: bool,
    pub max_capacity: i32,
    pub price_per_hour: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PlaceWithType {
    /// Whether new reservations may be requested for this place.
    pub fn is_bookable(&self) -> bool {
        is_bookable(self.is_active, self.type_is_active)
    }
}

/// DTO for creating a place.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlace {
    pub place_type_id: DbId,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub equipment: Option<String>,
}

/// DTO for updating a place. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePlace {
    pub place_type_id: Option<DbId>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub equipment: Option<String>,
    pub is_active: Option<bool>,
}
