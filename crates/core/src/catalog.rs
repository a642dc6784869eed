//! Place catalog rules: bookability and field validation for place types
//! and places.

use rust_decimal::Decimal;

/// Maximum length of a place or place type name.
pub const MAX_NAME_LEN: usize = 200;

/// A place can be booked only when it and its type are both active.
pub fn is_bookable(place_active: bool, type_active: bool) -> bool {
    place_active && type_active
}

/// Validate a trimmed, non-empty name within [`MAX_NAME_LEN`].
pub fn validate_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name must not be empty".to_string());
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(format!(
            "Name must be at most {MAX_NAME_LEN} characters long"
        ));
    }
    Ok(())
}

/// Validate place type fields: `max_capacity > 0` and a non-negative rate.
pub fn validate_place_type(
    name: &str,
    max_capacity: i32,
    price_per_hour: Decimal,
) -> Result<(), String> {
    validate_name(name)?;
    if max_capacity <= 0 {
        return Err(format!(
            "max_capacity must be greater than zero, got {max_capacity}"
        ));
    }
    if price_per_hour < Decimal::ZERO {
        return Err(format!(
            "price_per_hour must not be negative, got {price_per_hour}"
        ));
    }
    if price_per_hour.normalize().scale() > 2 {
        return Err(format!(
            "price_per_hour supports at most two decimal places, got {price_per_hour}"
        ));
    }
    Ok(())
}
