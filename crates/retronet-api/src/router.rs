//! Route definitions for the RetroNet HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(buddy_routes())
        .merge(block_routes())
        .merge(group_routes())
        .merge(presence_routes(&state))
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: login, logout, refresh, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
}

/// User self-service endpoints
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(handlers::user::get_profile))
        .route("/users/me", put(handlers::user::update_profile))
}

/// Buddy requests and buddy list
fn buddy_routes() -> Router<AppState> {
    Router::new()
        .route("/buddies", get(handlers::buddy::list_buddies))
        .route("/buddies/requests", post(handlers::buddy::send_request))
        .route("/buddies/requests", get(handlers::buddy::list_pending))
        .route(
            "/buddies/requests/{id}/respond",
            post(handlers::buddy::respond_request),
        )
        .route(
            "/buddies/{username}",
            delete(handlers::buddy::remove_buddy),
        )
}

/// Block list endpoints
fn block_routes() -> Router<AppState> {
    Router::new()
        .route("/blocks", post(handlers::block::block))
        .route("/blocks", get(handlers::block::list_blocked))
        .route("/blocks/{username}", delete(handlers::block::unblock))
}

/// Buddy group endpoints
fn group_routes() -> Router<AppState> {
    Router::new()
        .route("/groups", post(handlers::group::create_group))
        .route("/groups", get(handlers::group::list_groups))
        .route("/groups/{id}", put(handlers::group::update_group))
        .route("/groups/{id}", delete(handlers::group::delete_group))
}

/// Presence endpoints, throttled per caller
fn presence_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/presence/ping", get(handlers::presence::ping))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::ping_rate_limit,
        ))
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if cors_config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<axum::http::HeaderName> = cors_config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds))
}
