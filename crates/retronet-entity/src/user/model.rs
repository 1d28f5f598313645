//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user in the RetroNet community.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name, resolved case-insensitively.
    pub username: String,
    /// Display name shown to other users.
    pub screen_name: Option<String>,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Free-form status line. Display-only, never evaluated by presence.
    pub status: Option<String>,
    /// Away marker (e.g. "away", "brb"). Display-only.
    pub away_status: Option<String>,
    /// Away message shown alongside the away marker. Display-only.
    pub away_message: Option<String>,
    /// Ids of established buddies. Set semantics, order irrelevant.
    pub buddy_list: Vec<Uuid>,
    /// Ids of users this user has blocked.
    pub blocked_users: Vec<Uuid>,
    /// Last heartbeat timestamp; unset until the first ping.
    pub last_active_at: Option<DateTime<Utc>>,
    /// Set on explicit logout; forces the user offline regardless of
    /// heartbeat recency.
    pub manually_logged_off: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Check whether the given user id is in this user's buddy list.
    pub fn is_buddy(&self, other: Uuid) -> bool {
        self.buddy_list.contains(&other)
    }

    /// Check whether this user has blocked the given user id.
    pub fn has_blocked(&self, other: Uuid) -> bool {
        self.blocked_users.contains(&other)
    }
}

/// Partial update of a user's display fields.
///
/// `None` leaves the corresponding column unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfile {
    /// The user ID to update.
    pub id: Uuid,
    /// New screen name.
    pub screen_name: Option<String>,
    /// New status line.
    pub status: Option<String>,
    /// New away marker.
    pub away_status: Option<String>,
    /// New away message.
    pub away_message: Option<String>,
}
