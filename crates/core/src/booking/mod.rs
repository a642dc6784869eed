//! Reservation booking: status model, business rules, the pure validator,
//! the lifecycle state machine, and derived pricing.
//!
//! Nothing in here touches the database. The `db` crate persists what these
//! functions decide and the API's booking service wires the two together
//! inside a transaction.

pub mod error;
pub mod lifecycle;
pub mod pricing;
pub mod rules;
pub mod status;
pub mod validator;

pub use error::BookingError;
pub use lifecycle::{LifecycleAction, LifecycleState};
pub use rules::BookingRules;
pub use status::ReservationStatus;
pub use validator::{BookedSlot, Candidate, ValidationMode};
