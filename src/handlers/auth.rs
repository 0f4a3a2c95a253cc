// src/handlers/auth.rs

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    config::Config,
    error::AppError,
    models::user::{LoginRequest, SignupRequest},
    services,
    store::SharedStore,
    utils::{extract::ValidatedJson, jwt::Claims},
};

/// Registers a new user.
///
/// Returns 201 Created with a token and the user summary (no password hash).
pub async fn signup(
    State(store): State<SharedStore>,
    State(config): State<Config>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = services::auth::signup(store.as_ref(), &config, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Authenticates a user and returns a JWT token.
pub async fn login(
    State(store): State<SharedStore>,
    State(config): State<Config>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = services::auth::login(store.as_ref(), &config, payload).await?;
    Ok(Json(response))
}

/// Returns the caller's user summary.
pub async fn me(
    State(store): State<SharedStore>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user = services::auth::me(store.as_ref(), &claims).await?;
    Ok(Json(user))
}
