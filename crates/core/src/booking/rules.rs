//! Tunable booking limits.
//!
//! Operating hours are compared on the wall clock of a single configured
//! IANA time zone, never on the server's local zone.

use chrono::Duration;
use chrono_tz::Tz;

/// Earliest local hour a reservation may start.
pub const DEFAULT_OPENING_HOUR: u32 = 8;

/// Last local hour in which a reservation may end (`end.hour() <= closing`).
pub const DEFAULT_CLOSING_HOUR: u32 = 22;

/// Shortest bookable duration, in minutes.
pub const DEFAULT_MIN_DURATION_MINS: i64 = 60;

/// Longest bookable duration, in minutes.
pub const DEFAULT_MAX_DURATION_MINS: i64 = 8 * 60;

/// How far ahead a reservation may start, in days.
pub const DEFAULT_MAX_LEAD_DAYS: i64 = 180;

#[derive(Debug, Clone, PartialEq)]
pub struct BookingRules {
    pub timezone: Tz,
    pub opening_hour: u32,
    pub closing_hour: u32,
    pub min_duration: Duration,
    pub max_duration: Duration,
    pub max_lead: Duration,
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            opening_hour: DEFAULT_OPENING_HOUR,
            closing_hour: DEFAULT_CLOSING_HOUR,
            min_duration: Duration::minutes(DEFAULT_MIN_DURATION_MINS),
            max_duration: Duration::minutes(DEFAULT_MAX_DURATION_MINS),
            max_lead: Duration::days(DEFAULT_MAX_LEAD_DAYS),
        }
    }
}

impl BookingRules {
    /// Build a rule set, rejecting inconsistent limits.
    ///
    /// `closing_hour` is capped at 23 because a reservation must end on the
    /// same local day it starts.
    pub fn new(
        timezone: Tz,
        opening_hour: u32,
        closing_hour: u32,
        min_duration_mins: i64,
        max_duration_mins: i64,
        max_lead_days: i64,
    ) -> Result<Self, String> {
        if closing_hour > 23 {
            return Err(format!("closing hour must be at most 23, got {closing_hour}"));
        }
        if opening_hour >= closing_hour {
            return Err(format!(
                "opening hour ({opening_hour}) must be before closing hour ({closing_hour})"
            ));
        }
        if min_duration_mins <= 0 {
            return Err(format!(
                "minimum duration must be positive, got {min_duration_mins}"
            ));
        }
        if max_duration_mins < min_duration_mins {
            return Err(format!(
                "maximum duration ({max_duration_mins}) must not be below minimum ({min_duration_mins})"
            ));
        }
        if max_lead_days <= 0 {
            return Err(format!("booking horizon must be positive, got {max_lead_days}"));
        }

        Ok(Self {
            timezone,
            opening_hour,
            closing_hour,
            min_duration: Duration::minutes(min_duration_mins),
            max_duration: Duration::minutes(max_duration_mins),
            max_lead: Duration::days(max_lead_days),
        })
    }

    /// Parse an IANA zone name such as `America/Santiago`.
    pub fn parse_timezone(name: &str) -> Result<Tz, String> {
        name.trim()
            .parse::<Tz>()
            .map_err(|_| format!("Unknown time zone '{name}'"))
    }
}
