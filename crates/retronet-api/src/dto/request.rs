//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Update profile request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// Screen name.
    pub screen_name: Option<String>,
    /// Status line.
    pub status: Option<String>,
    /// Away marker.
    pub away_status: Option<String>,
    /// Away message.
    pub away_message: Option<String>,
}

/// Send buddy request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendBuddyRequest {
    /// Username of the user to befriend.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
}

/// Respond to a buddy request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RespondBuddyRequest {
    /// Either "accept" or "reject".
    #[validate(length(min = 1, message = "Action is required"))]
    pub action: String,
}

/// Block or unblock request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BlockUserRequest {
    /// Username of the user to block.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
}

/// Create buddy group request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGroupRequest {
    /// Group name.
    #[validate(length(min = 1, max = 64, message = "Group name must be 1-64 characters"))]
    pub name: String,
    /// Display position; omitted places the group last.
    pub sort_order: Option<i32>,
}

/// Update buddy group request. Omitted fields are unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateGroupRequest {
    /// New name.
    pub name: Option<String>,
    /// Replacement member list (wholesale, not merged).
    pub buddy_ids: Option<Vec<Uuid>>,
    /// New display position.
    pub sort_order: Option<i32>,
}
