//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use retronet_entity::buddy::BuddyGroup;
use retronet_entity::presence::BuddyPresence;
use retronet_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiration.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration.
    pub refresh_expires_at: DateTime<Utc>,
    /// User info.
    pub user: UserResponse,
}

/// User profile for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Screen name.
    pub screen_name: Option<String>,
    /// Status line.
    pub status: Option<String>,
    /// Away marker.
    pub away_status: Option<String>,
    /// Away message.
    pub away_message: Option<String>,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Last login.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl UserResponse {
    /// Build the response shape from a user entity.
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            screen_name: user.screen_name.clone(),
            status: user.status.clone(),
            away_status: user.away_status.clone(),
            away_message: user.away_message.clone(),
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}

/// One buddy entry in the presence snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuddyPresenceResponse {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Screen name.
    pub screen_name: Option<String>,
    /// Computed "online"/"offline".
    pub status: String,
    /// Away marker.
    pub away_status: Option<String>,
    /// Away message.
    pub away_message: Option<String>,
    /// Last heartbeat.
    pub last_active_at: Option<DateTime<Utc>>,
}

impl BuddyPresenceResponse {
    /// Build the response shape from a presence entry.
    pub fn from_presence(entry: &BuddyPresence) -> Self {
        Self {
            id: entry.id,
            username: entry.username.clone(),
            screen_name: entry.screen_name.clone(),
            status: entry.status.to_string(),
            away_status: entry.away_status.clone(),
            away_message: entry.away_message.clone(),
            last_active_at: entry.last_active_at,
        }
    }
}

/// Buddy group shape for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupResponse {
    /// Group ID.
    pub id: Uuid,
    /// Group name.
    pub name: String,
    /// Raw member ids, for cross-referencing against `buddies`.
    pub buddy_ids: Vec<Uuid>,
    /// Display position.
    pub sort_order: i32,
}

impl GroupResponse {
    /// Build the response shape from a group entity.
    pub fn from_group(group: &BuddyGroup) -> Self {
        Self {
            id: group.id,
            name: group.name.clone(),
            buddy_ids: group.buddy_ids.clone(),
            sort_order: group.sort_order,
        }
    }
}

/// Envelope for a single group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupEnvelopeResponse {
    /// The group.
    pub group: GroupResponse,
}

/// List of the caller's groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupsResponse {
    /// Groups ascending by sort order.
    pub groups: Vec<GroupResponse>,
}

/// Presence ping response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResponse {
    /// Every referenced buddy, classified.
    pub buddies: Vec<BuddyPresenceResponse>,
    /// The caller's groups with raw member ids.
    pub groups: Vec<GroupResponse>,
}

/// Result of sending a buddy request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendBuddyResponse {
    /// Outcome description.
    pub message: String,
    /// Id of the created request, when one was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<Uuid>,
    /// The linked buddy, on immediate mutual acceptance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buddy: Option<BuddySummaryResponse>,
}

/// Minimal public identity of another user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuddySummaryResponse {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Screen name.
    pub screen_name: Option<String>,
}

/// One pending buddy request, as listed for the recipient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingRequestResponse {
    /// Request ID.
    pub id: Uuid,
    /// Requester's user id.
    pub requester_id: Uuid,
    /// Requester's username.
    pub requester_username: String,
    /// Requester's screen name.
    pub requester_screen_name: Option<String>,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
}

/// List of pending buddy requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingRequestsResponse {
    /// Pending requests, oldest first.
    pub requests: Vec<PendingRequestResponse>,
}

/// One entry in the buddy list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuddyEntryResponse {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Screen name.
    pub screen_name: Option<String>,
    /// Computed "online"/"offline".
    pub status: String,
    /// Last heartbeat.
    pub last_seen: Option<DateTime<Utc>>,
}

/// The caller's buddy list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuddyListResponse {
    /// Buddies with computed presence.
    pub buddies: Vec<BuddyEntryResponse>,
}

/// The caller's blocked users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockedListResponse {
    /// Resolved identities of blocked users.
    pub blocked_users: Vec<BuddySummaryResponse>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Database status.
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let body = ApiResponse::ok(MessageResponse {
            message: "ok".to_string(),
        });
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["message"], "ok");
    }

    #[test]
    fn test_send_buddy_response_omits_absent_fields() {
        let body = SendBuddyResponse {
            message: "Buddy request sent".to_string(),
            request_id: Some(Uuid::new_v4()),
            buddy: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("request_id").is_some());
        assert!(json.get("buddy").is_none());
    }
}
