//! Authentication service — the thin identity boundary.
//!
//! Login and logout are also presence events: login refreshes the
//! heartbeat and clears the manual-logoff flag, logout sets it, which
//! forces the user offline regardless of heartbeat recency.

use std::sync::Arc;

use tracing::info;

use retronet_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use retronet_auth::password::PasswordHasher;
use retronet_core::error::AppError;
use retronet_core::result::AppResult;
use retronet_database::repositories::user::UserRepository;
use retronet_entity::user::User;

use crate::context::RequestContext;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// The authenticated user.
    pub user: User,
    /// Freshly issued token pair.
    pub tokens: TokenPair,
}

/// Handles login, logout, and token refresh.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Token encoder.
    encoder: Arc<JwtEncoder>,
    /// Token decoder.
    decoder: Arc<JwtDecoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            encoder,
            decoder,
        }
    }

    /// Authenticate a username/password pair and issue tokens.
    ///
    /// The same error is returned for an unknown username and a wrong
    /// password, so the response does not reveal which usernames exist.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginResult> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;

        let valid = self.hasher.verify_password(password, &user.password_hash)?;
        if !valid {
            return Err(AppError::unauthorized("Invalid username or password"));
        }

        self.user_repo.record_login(user.id).await?;
        let tokens = self.encoder.generate_token_pair(user.id, &user.username)?;

        info!(user_id = %user.id, "User logged in");

        Ok(LoginResult { user, tokens })
    }

    /// Mark the caller as manually logged off.
    pub async fn logout(&self, ctx: &RequestContext) -> AppResult<()> {
        self.user_repo.set_logged_off(ctx.user_id).await?;
        info!(user_id = %ctx.user_id, "User logged out");
        Ok(())
    }

    /// Exchange a refresh token for a fresh token pair.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<(User, TokenPair)> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;

        let user = self
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("Account no longer exists"))?;

        let tokens = self.encoder.generate_token_pair(user.id, &user.username)?;
        Ok((user, tokens))
    }
}
