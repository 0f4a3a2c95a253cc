// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    handlers::{admin, auth, quiz, system},
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware},
};

/// Any origin when `cors_origins` is empty, otherwise only the listed ones.
fn cors_layer(config: &Config) -> CorsLayer {
    let allow_origin = if config.cors_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(parse_origins(&config.cors_origins))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

fn parse_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}

/// Assembles the main application router.
///
/// * `/auth`, `/quiz`, `/admin` sub-routers plus `/health`.
/// * Protected routes pass `auth_middleware`; `/admin` also `admin_middleware`.
/// * Global middleware: Trace, CORS.
pub fn create_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .merge(
            Router::new()
                .route("/me", get(auth::me))
                .layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
        );

    let quiz_routes = Router::new()
        .route("/questions", get(quiz::list_questions))
        .merge(
            Router::new()
                .route("/submit", post(quiz::submit_quiz))
                .layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
        );

    let admin_routes = Router::new()
        .route("/stats", get(admin::get_stats))
        // Auth first, then Admin check
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .nest("/auth", auth_routes)
        .nest("/quiz", quiz_routes)
        .nest("/admin", admin_routes)
        .route("/health", get(system::health_check))
        .fallback(system::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config)),
        )
        .with_state(state)
}
