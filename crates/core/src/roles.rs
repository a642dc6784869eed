//! Well-known role name constants and the acting identity.
//!
//! Role names are issued by the identity provider inside the access token's
//! `role` claim.

use crate::types::DbId;

pub const ROLE_STAFF: &str = "staff";
pub const ROLE_MEMBER: &str = "member";
pub const ROLE_USER: &str = "user";

/// The identity performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: DbId,
    pub is_staff: bool,
}

impl Actor {
    pub fn new(user_id: DbId, is_staff: bool) -> Self {
        Self { user_id, is_staff }
    }

    /// Build an actor from a role name. Only [`ROLE_STAFF`] grants staff rights.
    pub fn from_role(user_id: DbId, role: &str) -> Self {
        Self {
            user_id,
            is_staff: role == ROLE_STAFF,
        }
    }
}
