//! User self-service operations — profile viewing and display fields.

use std::sync::Arc;

use tracing::info;

use retronet_core::error::AppError;
use retronet_core::result::AppResult;
use retronet_database::repositories::user::UserRepository;
use retronet_entity::user::{UpdateProfile, User};

use crate::context::RequestContext;

/// Handles user self-service operations.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
}

/// Data for updating a user's own profile.
///
/// All fields are optional; omitted fields are unchanged. The status,
/// away-status, and away-message lines are display-only and never
/// evaluated by the presence engine.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UpdateProfileRequest {
    /// New screen name.
    pub screen_name: Option<String>,
    /// New status line.
    pub status: Option<String>,
    /// New away marker.
    pub away_status: Option<String>,
    /// New away message.
    pub away_message: Option<String>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Gets the current user's full profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates the current user's display fields.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        req: UpdateProfileRequest,
    ) -> AppResult<User> {
        if let Some(screen_name) = &req.screen_name {
            if screen_name.trim().is_empty() {
                return Err(AppError::validation("Screen name cannot be empty"));
            }
        }

        let user = self
            .user_repo
            .update_profile(&UpdateProfile {
                id: ctx.user_id,
                screen_name: req.screen_name,
                status: req.status,
                away_status: req.away_status,
                away_message: req.away_message,
            })
            .await?;

        info!(user_id = %ctx.user_id, "Profile updated");

        Ok(user)
    }
}
