//! Presence classification value objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::buddy::BuddyGroup;

/// Binary presence classification derived from heartbeat state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnlineStatus {
    /// Heartbeat is fresh and the user has not logged off.
    Online,
    /// No heartbeat, a stale heartbeat, or an explicit logoff.
    Offline,
}

impl OnlineStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

impl fmt::Display for OnlineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One buddy's presence as seen by a polling client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuddyPresence {
    /// The buddy's user id.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Screen name.
    pub screen_name: Option<String>,
    /// Computed online/offline classification.
    pub status: OnlineStatus,
    /// Display-only away marker, passed through verbatim.
    pub away_status: Option<String>,
    /// Display-only away message, passed through verbatim.
    pub away_message: Option<String>,
    /// The buddy's last heartbeat.
    pub last_active_at: Option<DateTime<Utc>>,
}

/// The consolidated snapshot returned from a presence ping: every
/// buddy (from the buddy list and all group memberships) classified,
/// plus the caller's groups with raw member ids for cross-referencing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterSnapshot {
    /// Classified presence for the union of referenced buddies.
    pub buddies: Vec<BuddyPresence>,
    /// The caller's groups, ascending by sort order.
    pub groups: Vec<BuddyGroup>,
}
