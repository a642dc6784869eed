//! Reservation status state machine.
//!
//! ```text
//! pending  --approve-->  approved  --complete-->  completed
//!    |                      |
//!    +--reject--> rejected  |
//!    |                      |
//!    +------cancel----------+-->  cancelled
//! ```
//!
//! Rejected, cancelled and completed are terminal. Transitions never re-run
//! the validator: an approved reservation stays valid even if its place is
//! later deactivated.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::booking::error::BookingError;
use crate::booking::status::ReservationStatus;
use crate::error::CoreError;
use crate::roles::Actor;
use crate::types::{DbId, Timestamp};

/// A lifecycle operation, used in error messages and audit entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleAction {
    Approve,
    Reject,
    Cancel,
    Complete,
}

impl LifecycleAction {
    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleAction::Approve => "approve",
            LifecycleAction::Reject => "reject",
            LifecycleAction::Cancel => "cancel",
            LifecycleAction::Complete => "complete",
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The mutable part of a reservation that transitions read and write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleState {
    pub status: ReservationStatus,
    pub requester_id: DbId,
    pub end_time: Timestamp,
    pub approved_by: Option<DbId>,
    pub approved_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}

/// Target status of `action`, or `None` when `from` does not allow it.
pub fn next_status(from: ReservationStatus, action: LifecycleAction) -> Option<ReservationStatus> {
    use ReservationStatus::*;

    if from.is_terminal() {
        return None;
    }
    match (from, action) {
        (Pending, LifecycleAction::Approve) => Some(Approved),
        (Pending, LifecycleAction::Reject) => Some(Rejected),
        (Pending | Approved, LifecycleAction::Cancel) => Some(Cancelled),
        (Approved, LifecycleAction::Complete) => Some(Completed),
        _ => None,
    }
}

fn transition(
    state: &LifecycleState,
    action: LifecycleAction,
) -> Result<ReservationStatus, BookingError> {
    next_status(state.status, action).ok_or(BookingError::InvalidTransition {
        from: state.status,
        action,
    })
}

/// `pending -> approved`, stamping the approver and approval time.
pub fn approve(state: &mut LifecycleState, by_staff: DbId, now: Timestamp) -> Result<(), CoreError> {
    let next = transition(state, LifecycleAction::Approve)?;
    state.status = next;
    state.approved_by = Some(by_staff);
    state.approved_at = Some(now);
    state.updated_at = now;
    Ok(())
}

/// `pending -> rejected`.
pub fn reject(state: &mut LifecycleState, now: Timestamp) -> Result<(), CoreError> {
    let next = transition(state, LifecycleAction::Reject)?;
    state.status = next;
    state.updated_at = now;
    Ok(())
}

/// `pending | approved -> cancelled`, by the requester or staff.
pub fn cancel(state: &mut LifecycleState, by: &Actor, now: Timestamp) -> Result<(), CoreError> {
    let next = transition(state, LifecycleAction::Cancel)?;
    if !by.is_staff && by.user_id != state.requester_id {
        return Err(CoreError::Forbidden(
            "Only the requester or staff may cancel a reservation".into(),
        ));
    }
    state.status = next;
    state.updated_at = now;
    Ok(())
}

/// `approved -> completed`, once the reservation has ended.
pub fn complete(state: &mut LifecycleState, now: Timestamp) -> Result<(), CoreError> {
    let next = transition(state, LifecycleAction::Complete)?;
    if now < state.end_time {
        return Err(BookingError::InvalidTransition {
            from: state.status,
            action: LifecycleAction::Complete,
        }
        .into());
    }
    state.status = next;
    state.updated_at = now;
    Ok(())
}
