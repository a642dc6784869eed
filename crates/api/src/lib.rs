//! Chamber booking API server library.
//!
//! Exposes the core building blocks (config, state, error handling, booking
//! services, routes) so integration tests and the binary entrypoint can both
//! access them.

pub mod audit;
pub mod auth;
pub mod booking;
pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
