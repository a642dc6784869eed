//! Pure reservation validation.
//!
//! Rules run in a fixed order and stop at the first violation:
//!
//! 1. interval (`end > start`)
//! 2. start in the future (skipped for edits of non-time fields)
//! 3. booking horizon
//! 4. operating hours, on the configured zone's wall clock
//! 5. duration bounds
//! 6. party size against the place type's capacity
//! 7. overlap with pending or approved reservations of the same place

use chrono::Timelike;

use crate::booking::error::BookingError;
use crate::booking::rules::BookingRules;
use crate::booking::status::ReservationStatus;
use crate::types::{DbId, Timestamp};

/// Longest purpose text accepted on a reservation.
pub const MAX_PURPOSE_LEN: usize = 200;

/// The reservation being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub party_size: i32,
    /// `max_capacity` of the target place's type.
    pub max_capacity: i32,
}

/// An existing reservation on the same place, reduced to what the conflict
/// rule needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookedSlot {
    pub id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub status: ReservationStatus,
}

/// Whether the start-in-future rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// A brand-new request; every rule applies.
    NewRequest,
    /// Revalidation of an existing reservation whose times did not change.
    FieldEdit,
}

/// Half-open interval overlap: `[a_start, a_end)` and `[b_start, b_end)`
/// intersect. Touching endpoints do not overlap.
pub fn overlaps(
    a_start: Timestamp,
    a_end: Timestamp,
    b_start: Timestamp,
    b_end: Timestamp,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Rule 1.
pub fn check_interval(start: Timestamp, end: Timestamp) -> Result<(), BookingError> {
    if end > start {
        Ok(())
    } else {
        Err(BookingError::InvalidInterval { start, end })
    }
}

/// First blocking reservation overlapping `[start, end)`, ignoring
/// `excluding_id`.
pub fn find_conflict(
    existing: &[BookedSlot],
    start: Timestamp,
    end: Timestamp,
    excluding_id: Option<DbId>,
) -> Option<&BookedSlot> {
    existing.iter().find(|slot| {
        Some(slot.id) != excluding_id
            && slot.status.blocks_slot()
            && overlaps(slot.start_time, slot.end_time, start, end)
    })
}

/// Rule 7.
pub fn check_conflict(
    existing: &[BookedSlot],
    start: Timestamp,
    end: Timestamp,
    excluding_id: Option<DbId>,
) -> Result<(), BookingError> {
    match find_conflict(existing, start, end, excluding_id) {
        Some(slot) => Err(BookingError::SlotUnavailable {
            conflicting_id: Some(slot.id),
        }),
        None => Ok(()),
    }
}

/// Availability probe: rules 1 and 7 only.
pub fn check_availability(
    existing: &[BookedSlot],
    start: Timestamp,
    end: Timestamp,
) -> Result<(), BookingError> {
    check_interval(start, end)?;
    check_conflict(existing, start, end, None)
}

/// Run every rule against `candidate`.
pub fn validate(
    rules: &BookingRules,
    candidate: &Candidate,
    existing: &[BookedSlot],
    now: Timestamp,
    mode: ValidationMode,
    excluding_id: Option<DbId>,
) -> Result<(), BookingError> {
    let Candidate {
        start_time: start,
        end_time: end,
        party_size,
        max_capacity,
    } = *candidate;

    check_interval(start, end)?;

    if mode == ValidationMode::NewRequest && start <= now {
        return Err(BookingError::NotInFuture { start, now });
    }

    let latest = now + rules.max_lead;
    if start > latest {
        return Err(BookingError::TooFarInFuture { start, latest });
    }

    check_operating_hours(rules, start, end)?;

    let duration = end - start;
    if duration < rules.min_duration || duration > rules.max_duration {
        return Err(BookingError::DurationOutOfRange {
            minutes: duration.num_minutes(),
            min_minutes: rules.min_duration.num_minutes(),
            max_minutes: rules.max_duration.num_minutes(),
        });
    }

    if party_size > max_capacity {
        return Err(BookingError::CapacityExceeded {
            requested: party_size,
            limit: max_capacity,
        });
    }

    check_conflict(existing, start, end, excluding_id)
}

/// Rule 4. The start's local hour must be at or after opening; the end must
/// fall on the same local day, within the closing hour at the latest.
fn check_operating_hours(
    rules: &BookingRules,
    start: Timestamp,
    end: Timestamp,
) -> Result<(), BookingError> {
    let local_start = start.with_timezone(&rules.timezone);
    let local_end = end.with_timezone(&rules.timezone);

    let starts_after_opening = local_start.hour() >= rules.opening_hour;
    let same_day = local_start.date_naive() == local_end.date_naive();
    let ends_by_closing = local_end.hour() <= rules.closing_hour;

    if starts_after_opening && same_day && ends_by_closing {
        Ok(())
    } else {
        Err(BookingError::OutsideOperatingHours {
            opening_hour: rules.opening_hour,
            closing_hour: rules.closing_hour,
            timezone: rules.timezone.name().to_string(),
        })
    }
}

/// Field checks that sit outside the ordered rules: a non-blank purpose
/// within [`MAX_PURPOSE_LEN`] and a positive party size.
pub fn validate_request_details(purpose: &str, party_size: i32) -> Result<(), String> {
    let purpose = purpose.trim();
    if purpose.is_empty() {
        return Err("Purpose is required".to_string());
    }
    if purpose.chars().count() > MAX_PURPOSE_LEN {
        return Err(format!(
            "Purpose must be at most {MAX_PURPOSE_LEN} characters long"
        ));
    }
    if party_size < 1 {
        return Err(format!("Party size must be at least 1, got {party_size}"));
    }
    Ok(())
}
