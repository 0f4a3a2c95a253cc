// src/services/auth.rs

use chrono::Utc;
use uuid::Uuid;

use crate::{
    config::Config,
    error::AppError,
    models::user::{AuthResponse, LoginRequest, Role, SignupRequest, User, UserSummary},
    store::Store,
    utils::{
        hash::{hash_password_blocking, verify_password_blocking},
        jwt::{Claims, sign_jwt},
    },
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Creates a `user`-role account and returns a token for it.
///
/// The email is checked against existing users before hashing, and again by
/// the store at write time.
pub async fn signup(
    store: &dyn Store,
    config: &Config,
    payload: SignupRequest,
) -> Result<AuthResponse, AppError> {
    if store.find_user_by_email(&payload.email).await?.is_some() {
        return Err(AppError::BadRequest("User already exists".to_string()));
    }

    let password = hash_password_blocking(payload.password).await?;
    let user = User {
        id: Uuid::new_v4().to_string(),
        name: payload.name,
        email: payload.email,
        password,
        role: Role::User,
        created_at: Utc::now(),
    };

    store.insert_user(user.clone()).await?;
    tracing::info!(user_id = %user.id, "user signed up");

    let token = sign_jwt(&user, &config.jwt_secret, config.jwt_expiration)?;

    Ok(AuthResponse {
        message: "User created successfully".to_string(),
        token,
        user: UserSummary::from(&user),
    })
}

/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn login(
    store: &dyn Store,
    config: &Config,
    payload: LoginRequest,
) -> Result<AuthResponse, AppError> {
    let Some(user) = store.find_user_by_email(&payload.email).await? else {
        tracing::warn!("login attempt for unknown email");
        return Err(AppError::AuthError(INVALID_CREDENTIALS.to_string()));
    };

    let is_valid = verify_password_blocking(payload.password, user.password.clone()).await?;
    if !is_valid {
        tracing::warn!(user_id = %user.id, "login attempt with wrong password");
        return Err(AppError::AuthError(INVALID_CREDENTIALS.to_string()));
    }

    let token = sign_jwt(&user, &config.jwt_secret, config.jwt_expiration)?;

    Ok(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: UserSummary::from(&user),
    })
}

/// Summary of the token's subject, looked up fresh from the store.
pub async fn me(store: &dyn Store, claims: &Claims) -> Result<UserSummary, AppError> {
    let user = store
        .find_user_by_id(&claims.sub)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok(UserSummary::from(&user))
}
