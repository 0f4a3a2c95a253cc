// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Tokens stay valid for seven days after issuance.
pub const DEFAULT_JWT_EXPIRATION_SECS: u64 = 7 * 24 * 60 * 60;

/// Maximum number of entries in the admin "recent attempts" list.
pub const RECENT_ATTEMPTS_LIMIT: usize = 5;

const FALLBACK_JWT_SECRET: &str = "fallback-secret-key";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub db_file: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub admin_email: String,
    pub admin_password: String,
    pub questions_file: Option<String>,
    pub cors_origins: Vec<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);

        let db_file = env::var("DB_FILE").unwrap_or_else(|_| "./db.json".to_string());

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            eprintln!("JWT_SECRET not set, falling back to an insecure default secret");
            FALLBACK_JWT_SECRET.to_string()
        });

        let jwt_expiration = env::var("JWT_EXPIRATION_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_JWT_EXPIRATION_SECS);

        let admin_email =
            env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@prepper.test".to_string());
        let admin_password =
            env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "Password123!".to_string());

        let questions_file = env::var("QUESTIONS_FILE").ok();

        // Unset or empty means any origin.
        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        Self {
            port,
            db_file,
            jwt_secret,
            jwt_expiration,
            admin_email,
            admin_password,
            questions_file,
            cors_origins,
            rust_log,
        }
    }

    /// Configuration for tests: in-memory friendly, short-lived secret.
    pub fn for_tests(jwt_secret: &str) -> Self {
        Self {
            port: 0,
            db_file: String::new(),
            jwt_secret: jwt_secret.to_string(),
            jwt_expiration: DEFAULT_JWT_EXPIRATION_SECS,
            admin_email: "admin@prepper.test".to_string(),
            admin_password: "Password123!".to_string(),
            questions_file: None,
            cors_origins: Vec::new(),
            rust_log: "error".to_string(),
        }
    }
}
