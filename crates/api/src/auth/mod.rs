//! Authentication primitives.
//!
//! Tokens are issued by the chamber's identity provider; this service only
//! verifies them. [`jwt::generate_access_token`] exists for local tooling
//! and tests that need a signed token.

pub mod jwt;
