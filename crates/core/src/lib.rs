//! Domain logic for the chamber booking service.
//!
//! This crate has zero internal dependencies so the database layer, the HTTP
//! layer and any future tooling can share the same rules.

pub mod audit;
pub mod booking;
pub mod catalog;
pub mod error;
pub mod pagination;
pub mod roles;
pub mod types;
