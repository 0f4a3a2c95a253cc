// src/services/admin.rs

use crate::{
    config::RECENT_ATTEMPTS_LIMIT,
    error::AppError,
    models::{
        stats::{AdminIdentity, StatsReport},
        user::Role,
    },
    store::Store,
    utils::jwt::{Claims, require_role},
};

/// Usage report for admins.
///
/// `recent_attempts` only lists attempts owned by the calling admin, newest
/// first. Other users' attempts are counted but not listed.
pub async fn get_stats(store: &dyn Store, claims: &Claims) -> Result<StatsReport, AppError> {
    require_role(claims, Role::Admin)?;

    let total_users = store.count_users().await?;
    let total_attempts = store.count_attempts().await?;

    let mut recent_attempts = store.attempts_by_user(&claims.sub).await?;
    recent_attempts.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
    recent_attempts.truncate(RECENT_ATTEMPTS_LIMIT);

    Ok(StatsReport {
        total_users,
        total_attempts,
        recent_attempts,
        admin_user: AdminIdentity {
            id: claims.sub.clone(),
            email: claims.email.clone(),
        },
    })
}
