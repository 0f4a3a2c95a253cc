// src/handlers/admin.rs

use axum::{
    Json,
    extract::{Extension, State},
    response::IntoResponse,
};

use crate::{error::AppError, services, store::SharedStore, utils::jwt::Claims};

/// Aggregate usage statistics.
/// Admin only.
pub async fn get_stats(
    State(store): State<SharedStore>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let report = services::admin::get_stats(store.as_ref(), &claims).await?;
    Ok(Json(report))
}
