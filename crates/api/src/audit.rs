//! Fire-and-forget audit recording.

use camara_core::audit::describe_action;
use camara_core::types::DbId;
use camara_db::models::audit::CreateAuditLog;
use camara_db::repositories::AuditLogRepo;
use sqlx::PgPool;

/// Append an audit entry for `actor_id` performing `action` on a subject.
///
/// Never fails: a write error is logged and swallowed so the caller's
/// already-committed operation still succeeds.
pub async fn record(
    pool: &PgPool,
    actor_id: DbId,
    action: &str,
    subject_type: &str,
    subject_id: DbId,
) {
    let entry = CreateAuditLog {
        actor_id,
        action: action.to_string(),
        subject_type: subject_type.to_string(),
        subject_id,
    };

    if let Err(e) = AuditLogRepo::insert(pool, &entry).await {
        tracing::warn!(
            error = %e,
            actor_id,
            action = describe_action(action),
            subject_type,
            subject_id,
            "Failed to record audit entry"
        );
    }
}
