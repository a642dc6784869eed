//! Chamber membership roster.

use camara_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `members` table. `user_id` is the identity provider's id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Member {
    pub user_id: DbId,
    pub display_name: String,
    pub is_active: bool,
    pub affiliated_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for enrolling (or re-activating) a member.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertMember {
    pub user_id: DbId,
    pub display_name: String,
    pub is_active: bool,
}
