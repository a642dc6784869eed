use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Status of a reservation. Stored as lowercase text in `reservations.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
    Completed,
}

/// Statuses that hold a slot. Pending is a soft hold, approved a hard one;
/// both block overlapping requests.
pub const BLOCKING_STATUSES: &[ReservationStatus] =
    &[ReservationStatus::Pending, ReservationStatus::Approved];

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 5] = [
        ReservationStatus::Pending,
        ReservationStatus::Approved,
        ReservationStatus::Rejected,
        ReservationStatus::Cancelled,
        ReservationStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Approved => "approved",
            ReservationStatus::Rejected => "rejected",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Completed => "completed",
        }
    }

    /// No transition leaves a terminal status.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ReservationStatus::Rejected | ReservationStatus::Cancelled | ReservationStatus::Completed
        )
    }

    /// Whether a reservation in this status occupies its time slot.
    pub fn blocks_slot(self) -> bool {
        BLOCKING_STATUSES.contains(&self)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|s| s.as_str()).collect();
                format!(
                    "Invalid reservation status '{s}'. Must be one of: {}",
                    valid.join(", ")
                )
            })
    }
}
