//! Derived duration and cost. Neither value is stored.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::Timestamp;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// `(end - start)` in hours, to the millisecond.
pub fn duration_hours(start: Timestamp, end: Timestamp) -> Decimal {
    Decimal::from((end - start).num_milliseconds()) / Decimal::from(MILLIS_PER_HOUR)
}

/// `duration_hours * price_per_hour`, rounded half away from zero to cents.
///
/// Computed from whole milliseconds so the only rounding is the final one.
/// The result always carries two decimal places.
pub fn cost_total(start: Timestamp, end: Timestamp, price_per_hour: Decimal) -> Decimal {
    let millis = Decimal::from((end - start).num_milliseconds());
    let mut cost = (price_per_hour * millis / Decimal::from(MILLIS_PER_HOUR))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cost.rescale(2);
    cost
}
