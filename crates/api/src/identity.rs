//! Membership lookup against the chamber's roster.
//!
//! The roster is maintained by the affiliation workflow; the booking
//! subsystem only asks whether a user is currently a member.

use async_trait::async_trait;
use camara_core::types::DbId;
use camara_db::repositories::MemberRepo;
use sqlx::PgPool;

use crate::error::AppResult;

/// Answers `is_member(user_id)` for booking entry points.
#[async_trait]
pub trait MembershipDirectory: Send + Sync {
    async fn is_member(&self, user_id: DbId) -> AppResult<bool>;
}

/// [`MembershipDirectory`] backed by the `members` table.
pub struct PgMembershipDirectory {
    pool: PgPool,
}

impl PgMembershipDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipDirectory for PgMembershipDirectory {
    async fn is_member(&self, user_id: DbId) -> AppResult<bool> {
        Ok(MemberRepo::is_active_member(&self.pool, user_id).await?)
    }
}
