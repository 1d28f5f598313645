//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use retronet_auth::jwt::JwtDecoder;
use retronet_core::config::AppConfig;
use retronet_database::DatabasePool;
use retronet_service::auth::AuthService;
use retronet_service::block::BlockService;
use retronet_service::buddy::BuddyService;
use retronet_service::group::GroupService;
use retronet_service::presence::PresenceService;
use retronet_service::user::UserService;

use crate::middleware::rate_limit::RateLimiter;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db: DatabasePool,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Login/logout/refresh service
    pub auth_service: Arc<AuthService>,
    /// Profile self-service
    pub user_service: Arc<UserService>,
    /// Buddy request lifecycle service
    pub buddy_service: Arc<BuddyService>,
    /// Block list service
    pub block_service: Arc<BlockService>,
    /// Buddy group service
    pub group_service: Arc<GroupService>,
    /// Presence aggregator
    pub presence_service: Arc<PresenceService>,

    // ── Throttling ───────────────────────────────────────────
    /// Per-caller token bucket for the ping endpoint
    pub ping_limiter: Arc<RateLimiter>,
}
