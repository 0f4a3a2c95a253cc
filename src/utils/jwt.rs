// src/utils/jwt.rs

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    error::AppError,
    models::user::{Role, User},
};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Access token required")]
    TokenMissing,

    #[error("Invalid or expired token")]
    TokenInvalid,

    #[error("{0} access required")]
    Forbidden(Role),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// JWT Claims structure.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Claims {
    /// Subject - the user id.
    pub sub: String,
    pub email: String,
    pub role: Role,
    /// Issued-at as Unix timestamp.
    pub iat: usize,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

/// Signs a new JWT for `user`, valid for `expiration_seconds` from now.
pub fn sign_jwt(user: &User, secret: &str, expiration_seconds: u64) -> Result<String, AuthError> {
    let now = Utc::now().timestamp().max(0) as usize;

    let claims = Claims {
        sub: user.id.clone(),
        email: user.email.clone(),
        role: user.role,
        iat: now,
        exp: now + expiration_seconds as usize,
    };

    encode_claims(&claims, secret)
}

fn encode_claims(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Signing(e.to_string()))
}

/// Verifies and decodes a JWT string.
///
/// Bad signatures, malformed tokens and expired tokens are all reported as
/// `TokenInvalid`. Expiry is checked without leeway.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| AuthError::TokenInvalid)?;

    Ok(token_data.claims)
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::TokenMissing)
}

pub fn require_role(claims: &Claims, role: Role) -> Result<(), AuthError> {
    if claims.role != role {
        return Err(AuthError::Forbidden(role));
    }
    Ok(())
}

/// Axum Middleware: Authentication.
///
/// Validates the 'Authorization: Bearer <token>' header and injects the
/// decoded `Claims` into the request extensions for handlers to use.
pub async fn auth_middleware(
    State(config): State<Config>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers())?;

    let claims = verify_jwt(token, &config.jwt_secret).inspect_err(|_| {
        tracing::warn!("rejected invalid or expired token");
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Axum Middleware: Admin Authorization.
///
/// Must be used AFTER `auth_middleware`.
pub async fn admin_middleware(req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let claims = req
        .extensions()
        .get::<Claims>()
        .ok_or(AuthError::TokenMissing)?;

    require_role(claims, Role::Admin)?;

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const SECRET: &str = "jwt_unit_test_secret";

    fn user(role: Role) -> User {
        User {
            id: "user-42".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: String::new(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issued_token_carries_identity() {
        let token = sign_jwt(&user(Role::Admin), SECRET, 3600).unwrap();
        let claims = verify_jwt(&token, SECRET).unwrap();

        assert_eq!(claims.sub, "user-42");
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = sign_jwt(&user(Role::User), SECRET, 3600).unwrap();
        assert!(matches!(
            verify_jwt(&token, "another_secret"),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(matches!(
            verify_jwt("not.a.jwt", SECRET),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn expired_token_is_invalid() {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "user-42".to_string(),
            email: "ada@example.com".to_string(),
            role: Role::User,
            iat: now - 7200,
            exp: now - 10,
        };
        let token = encode_claims(&claims, SECRET).unwrap();

        assert!(matches!(
            verify_jwt(&token, SECRET),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn require_role_rejects_other_roles() {
        let token = sign_jwt(&user(Role::User), SECRET, 60).unwrap();
        let claims = verify_jwt(&token, SECRET).unwrap();

        assert!(require_role(&claims, Role::User).is_ok());
        let err = require_role(&claims, Role::Admin).unwrap_err();
        assert_eq!(err.to_string(), "admin access required");
    }

    #[test]
    fn bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert!(matches!(bearer_token(&headers), Err(AuthError::TokenMissing)));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(matches!(bearer_token(&headers), Err(AuthError::TokenMissing)));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert!(matches!(bearer_token(&headers), Err(AuthError::TokenMissing)));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def");
    }
}
