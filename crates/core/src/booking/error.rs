use crate::booking::lifecycle::LifecycleAction;
use crate::booking::status::ReservationStatus;
use crate::types::{DbId, Timestamp};

/// A violated booking rule or an illegal status transition.
///
/// Each variant carries the offending values so callers can build a precise
/// user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("End time {end} must be after start time {start}")]
    InvalidInterval { start: Timestamp, end: Timestamp },

    #[error("Start time {start} is not in the future")]
    NotInFuture { start: Timestamp, now: Timestamp },

    #[error("Start time {start} is beyond the booking horizon ending {latest}")]
    TooFarInFuture { start: Timestamp, latest: Timestamp },

    #[error(
        "Reservations must start at or after {opening_hour:02}:00 and end within \
         hour {closing_hour:02} of the same day ({timezone})"
    )]
    OutsideOperatingHours {
        opening_hour: u32,
        closing_hour: u32,
        timezone: String,
    },

    #[error(
        "Duration of {minutes} minutes is outside the allowed range of \
         {min_minutes} to {max_minutes} minutes"
    )]
    DurationOutOfRange {
        minutes: i64,
        min_minutes: i64,
        max_minutes: i64,
    },

    #[error("Party size {requested} exceeds the place capacity of {limit}")]
    CapacityExceeded { requested: i32, limit: i32 },

    /// `conflicting_id` is `None` when the overlap was caught by the
    /// database constraint rather than the validator.
    #[error("The requested time slot is no longer available")]
    SlotUnavailable { conflicting_id: Option<DbId> },

    #[error("Cannot {action} a reservation that is {from}")]
    InvalidTransition {
        from: ReservationStatus,
        action: LifecycleAction,
    },
}

impl BookingError {
    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            BookingError::InvalidInterval { .. } => "INVALID_INTERVAL",
            BookingError::NotInFuture { .. } => "NOT_IN_FUTURE",
            BookingError::TooFarInFuture { .. } => "TOO_FAR_IN_FUTURE",
            BookingError::OutsideOperatingHours { .. } => "OUTSIDE_OPERATING_HOURS",
            BookingError::DurationOutOfRange { .. } => "DURATION_OUT_OF_RANGE",
            BookingError::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            BookingError::SlotUnavailable { .. } => "SLOT_UNAVAILABLE",
            BookingError::InvalidTransition { .. } => "INVALID_TRANSITION",
        }
    }

    /// Whether the error describes contention with another reservation
    /// or state rather than a malformed request.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            BookingError::SlotUnavailable { .. } | BookingError::InvalidTransition { .. }
        )
    }
}
