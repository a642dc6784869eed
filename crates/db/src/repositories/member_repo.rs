//! Repository for the `members` table.

use camara_core::types::DbId;
use sqlx::PgPool;

use crate::models::member::{Member, UpsertMember};

const COLUMNS: &str = "user_id, display_name, is_active, affiliated_at, updated_at";

/// Membership lookups.
pub struct MemberRepo;

impl MemberRepo {
    /// Whether `user_id` is an active member.
    pub async fn is_active_member(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM members WHERE user_id = $1 AND is_active)",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Insert or refresh a member row.
    pub async fn upsert(pool: &PgPool, input: &UpsertMember) -> Result<Member, sqlx::Error> {
        let query = format!(
            "INSERT INTO members (user_id, display_name, is_active)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id) DO UPDATE SET
                display_name = EXCLUDED.display_name,
                is_active = EXCLUDED.is_active
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(input.user_id)
            .bind(&input.display_name)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }
}
