use camara_core::booking::pricing::{cost_total, duration_hours};
use camara_core::booking::validator::{check_conflict, overlaps, validate};
use camara_core::booking::{
    BookedSlot, BookingError, BookingRules, Candidate, ReservationStatus, ValidationMode,
};
use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

type Timestamp = chrono::DateTime<chrono::Utc>;

/// Midnight UTC on a day far enough ahead of `now()` for every generated slot.
fn day() -> Timestamp {
    Utc.with_ymd_and_hms(2026, 5, 4, 0, 0, 0).unwrap()
}

fn now() -> Timestamp {
    Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap()
}

/// A slot inside operating hours on quarter-hour boundaries, 1 to 8 hours long.
fn slot_strategy() -> impl Strategy<Value = (Timestamp, Timestamp)> {
    // Start between 08:00 and 14:00, duration between 4 and 32 quarter hours.
    (32i64..=56, 4i64..=32).prop_map(|(start_q, len_q)| {
        let start = day() + Duration::minutes(start_q * 15);
        (start, start + Duration::minutes(len_q * 15))
    })
}

fn blocking_status() -> impl Strategy<Value = ReservationStatus> {
    prop_oneof![
        Just(ReservationStatus::Pending),
        Just(ReservationStatus::Approved),
    ]
}

fn released_status() -> impl Strategy<Value = ReservationStatus> {
    prop_oneof![
        Just(ReservationStatus::Rejected),
        Just(ReservationStatus::Cancelled),
        Just(ReservationStatus::Completed),
    ]
}

fn candidate(start: Timestamp, end: Timestamp) -> Candidate {
    Candidate {
        start_time: start,
        end_time: end,
        party_size: 1,
        max_capacity: 12,
    }
}

proptest! {
    #[test]
    fn validator_rejects_exactly_the_overlapping_requests(
        (a_start, a_end) in slot_strategy(),
        (b_start, b_end) in slot_strategy(),
        status in blocking_status(),
    ) {
        let existing = [BookedSlot { id: 1, start_time: a_start, end_time: a_end, status }];
        let result = validate(
            &BookingRules::default(),
            &candidate(b_start, b_end),
            &existing,
            now(),
            ValidationMode::NewRequest,
            None,
        );

        let expected_overlap = a_start < b_end && b_start < a_end;
        if expected_overlap {
            prop_assert_eq!(result, Err(BookingError::SlotUnavailable { conflicting_id: Some(1) }));
        } else {
            prop_assert_eq!(result, Ok(()));
        }
    }

    #[test]
    fn released_reservations_never_conflict(
        (a_start, a_end) in slot_strategy(),
        (b_start, b_end) in slot_strategy(),
        status in released_status(),
    ) {
        let existing = [BookedSlot { id: 1, start_time: a_start, end_time: a_end, status }];
        prop_assert_eq!(check_conflict(&existing, b_start, b_end, None), Ok(()));
    }

    #[test]
    fn overlap_is_symmetric(
        (a_start, a_end) in slot_strategy(),
        (b_start, b_end) in slot_strategy(),
    ) {
        prop_assert_eq!(
            overlaps(a_start, a_end, b_start, b_end),
            overlaps(b_start, b_end, a_start, a_end)
        );
    }

    #[test]
    fn back_to_back_slots_never_overlap(
        (start, end) in slot_strategy(),
        len_q in 4i64..=32,
    ) {
        let next_end = end + Duration::minutes(len_q * 15);
        prop_assert!(!overlaps(start, end, end, next_end));
    }

    #[test]
    fn cost_is_duration_times_rate(
        (start, end) in slot_strategy(),
        cents in 0i64..100_000,
    ) {
        let rate = Decimal::new(cents, 2);
        let hours = duration_hours(start, end);
        // Quarter-hour slots keep `hours` exact, so both sides round the same product.
        prop_assert_eq!(
            cost_total(start, end, rate),
            (hours * rate).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        );
        prop_assert_eq!(hours * Decimal::from(3600), Decimal::from((end - start).num_seconds()));
    }
}
