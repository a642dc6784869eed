//! Activity log constants.
//!
//! Every entry is an explicit `(actor, action, subject_type, subject_id)`
//! tuple. The storage side lives in the `db` crate.

// ---------------------------------------------------------------------------
// Action constants
// ---------------------------------------------------------------------------

/// Known actions recorded in the activity log.
pub mod actions {
    pub const RESERVATION_CREATE: &str = "reservation_create";
    pub const RESERVATION_CANCEL: &str = "reservation_cancel";
    pub const RESERVATION_APPROVE: &str = "reservation_approve";
    pub const RESERVATION_REJECT: &str = "reservation_reject";
    pub const RESERVATION_COMPLETE: &str = "reservation_complete";
    pub const PLACE_TYPE_CREATE: &str = "place_type_create";
    pub const PLACE_TYPE_UPDATE: &str = "place_type_update";
    pub const PLACE_CREATE: &str = "place_create";
    pub const PLACE_UPDATE: &str = "place_update";
}

/// Subject types that activity entries point at.
pub mod subjects {
    pub const RESERVATION: &str = "reservation";
    pub const PLACE_TYPE: &str = "place_type";
    pub const PLACE: &str = "place";
}

/// Human-readable description for an action, shown in the staff panel.
///
/// Unknown actions are echoed back unchanged.
pub fn describe_action(action: &str) -> &str {
    match action {
        actions::RESERVATION_CREATE => "Requested a reservation",
        actions::RESERVATION_CANCEL => "Cancelled a reservation",
        actions::RESERVATION_APPROVE => "Approved a reservation",
        actions::RESERVATION_REJECT => "Rejected a reservation",
        actions::RESERVATION_COMPLETE => "Marked a reservation as completed",
        actions::PLACE_TYPE_CREATE => "Created a place type",
        actions::PLACE_TYPE_UPDATE => "Updated a place type",
        actions::PLACE_CREATE => "Created a place",
        actions::PLACE_UPDATE => "Updated a place",
        other => other,
    }
}
