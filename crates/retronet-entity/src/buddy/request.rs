//! Directed buddy request entity and its status lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle status of a buddy request.
///
/// A request is created `pending` and transitions exactly once, to
/// `accepted` or `rejected`. Terminal states never transition again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "buddy_request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting the recipient's decision.
    Pending,
    /// The recipient accepted; both buddy lists were linked.
    Accepted,
    /// The recipient declined; no buddy-list mutation happened.
    Rejected,
}

impl RequestStatus {
    /// Whether this status permits no further transitions.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The recipient's decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestAction {
    /// Accept the request and establish the buddy relationship.
    Accept,
    /// Reject the request.
    Reject,
}

impl FromStr for RequestAction {
    type Err = retronet_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accept" => Ok(Self::Accept),
            "reject" => Ok(Self::Reject),
            _ => Err(retronet_core::AppError::validation(format!(
                "Invalid request action: '{s}'. Expected one of: accept, reject"
            ))),
        }
    }
}

/// A directed friendship proposal from `requester_id` to `recipient_id`.
///
/// At most one pending request exists per ordered pair; resolved rows
/// remain as history and never block a fresh request.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BuddyRequest {
    /// Unique request identifier.
    pub id: Uuid,
    /// The user who sent the request.
    pub requester_id: Uuid,
    /// The user the request is addressed to.
    pub recipient_id: Uuid,
    /// Current lifecycle status.
    pub status: RequestStatus,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// When the request was last updated.
    pub updated_at: DateTime<Utc>,
}

impl BuddyRequest {
    /// Whether this request is still awaiting a decision.
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Whether the given user is the recipient of this request.
    pub fn is_addressed_to(&self, user_id: Uuid) -> bool {
        self.recipient_id == user_id
    }
}

/// A pending request joined with the requester's public identity,
/// as listed for the recipient.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PendingBuddyRequest {
    /// Request identifier.
    pub id: Uuid,
    /// The requester's user id.
    pub requester_id: Uuid,
    /// The requester's username.
    pub requester_username: String,
    /// The requester's screen name.
    pub requester_screen_name: Option<String>,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(RequestStatus::Accepted.is_terminal());
        assert!(RequestStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_action_from_str() {
        assert_eq!("accept".parse::<RequestAction>().unwrap(), RequestAction::Accept);
        assert_eq!("REJECT".parse::<RequestAction>().unwrap(), RequestAction::Reject);
        assert!("block".parse::<RequestAction>().is_err());
    }
}
