// src/models/stats.rs

use serde::{Deserialize, Serialize};

use crate::models::attempt::Attempt;

/// Usage report served to admins.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub total_users: usize,
    pub total_attempts: usize,
    /// The caller's own attempts, newest first.
    pub recent_attempts: Vec<Attempt>,
    pub admin_user: AdminIdentity,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminIdentity {
    pub id: String,
    pub email: String,
}
