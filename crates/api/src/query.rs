//! Shared query parameter types for API handlers.

use camara_core::types::{DbId, Timestamp};
use serde::Deserialize;

/// A place and a `[start, end)` interval (`?place_id=&start_time=&end_time=`).
///
/// Used by the availability probe and the cost quote. Times are RFC 3339.
#[derive(Debug, Clone, Deserialize)]
pub struct SlotParams {
    pub place_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
}
