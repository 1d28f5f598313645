//! RetroNet Server — Presence & Buddy Relationship Engine
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use retronet_core::config::AppConfig;
use retronet_core::error::AppError;

use retronet_auth::jwt::{JwtDecoder, JwtEncoder};
use retronet_auth::password::PasswordHasher;
use retronet_database::repositories::buddy_group::BuddyGroupRepository;
use retronet_database::repositories::buddy_request::BuddyRequestRepository;
use retronet_database::repositories::user::UserRepository;
use retronet_service::auth::AuthService;
use retronet_service::block::BlockService;
use retronet_service::buddy::BuddyService;
use retronet_service::group::GroupService;
use retronet_service::presence::PresenceService;
use retronet_service::user::UserService;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration for the active environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("RETRONET_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting RetroNet v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = retronet_database::DatabasePool::connect(&config.database).await?;
    retronet_database::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(UserRepository::new(db.pool().clone()));
    let request_repo = Arc::new(BuddyRequestRepository::new(db.pool().clone()));
    let group_repo = Arc::new(BuddyGroupRepository::new(db.pool().clone()));

    // ── Step 3: Auth primitives ──────────────────────────────────
    let password_hasher = Arc::new(PasswordHasher::new());
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    // ── Step 4: Services ─────────────────────────────────────────
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
    ));
    let user_service = Arc::new(UserService::new(Arc::clone(&user_repo)));
    let buddy_service = Arc::new(BuddyService::new(
        Arc::clone(&user_repo),
        Arc::clone(&request_repo),
        &config.presence,
    ));
    let block_service = Arc::new(BlockService::new(Arc::clone(&user_repo)));
    let group_service = Arc::new(GroupService::new(Arc::clone(&group_repo)));
    let presence_service = Arc::new(PresenceService::new(
        Arc::clone(&user_repo),
        Arc::clone(&group_repo),
        &config.presence,
    ));

    let ping_limiter = Arc::new(retronet_api::middleware::rate_limit::RateLimiter::new(
        config.presence.ping_burst,
        config.presence.ping_refill_per_second,
    ));

    // ── Step 5: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let app_state = retronet_api::state::AppState {
        config: Arc::new(config),
        db: db.clone(),
        jwt_decoder,
        auth_service,
        user_service,
        buddy_service,
        block_service,
        group_service,
        presence_service,
        ping_limiter,
    };

    let app = retronet_api::router::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("RetroNet server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    db.close().await;
    tracing::info!("RetroNet server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
