//! Place type entity model and DTOs.

use camara_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A place type row. Capacity and hourly price live here, not on the place.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlaceType {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub max_capacity: i32,
    pub price_per_hour: Decimal,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a place type.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaceType {
    pub name: String,
    pub description: Option<String>,
    pub max_capacity: i32,
    pub price_per_hour: Decimal,
}

/// DTO for updating a place type. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePlaceType {
    pub name: Option<String>,
    pub description: Option<String>,
    pub max_capacity: Option<i32>,
    pub price_per_hour: Option<Decimal>,
    pub is_active: Option<bool>,
}
