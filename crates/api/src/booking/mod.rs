//! Booking services held in [`AppState`](crate::state::AppState).
//!
//! - [`catalog::PlaceCatalog`] -- place types and places.
//! - [`service::BookingService`] -- the reservation workflow.

pub mod catalog;
pub mod service;
