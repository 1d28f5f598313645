//! Buddy request manager: send, respond, remove, and listings.
//!
//! Validation happens before any mutation; the two-sided writes
//! (accept and mutual-collision resolution) are delegated to the
//! repository's transactional accept-and-link.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;
use uuid::Uuid;

use retronet_core::config::presence::PresenceConfig;
use retronet_core::error::AppError;
use retronet_core::result::AppResult;
use retronet_database::repositories::buddy_request::BuddyRequestRepository;
use retronet_database::repositories::user::UserRepository;
use retronet_entity::buddy::{BuddyRequest, PendingBuddyRequest, RequestAction};
use retronet_entity::presence::BuddyPresence;
use retronet_entity::user::User;

use crate::context::RequestContext;
use crate::presence::roster;

/// Result of sending a buddy request.
#[derive(Debug, Clone)]
pub enum SendOutcome {
    /// A fresh pending request was created.
    Sent {
        /// The created request.
        request: BuddyRequest,
    },
    /// The target had already proposed friendship; their request was
    /// accepted instead of creating a second one.
    MutualAccepted {
        /// The reverse request, now accepted.
        request: BuddyRequest,
        /// The newly linked buddy.
        buddy: User,
    },
}

/// Handles the directed buddy-request lifecycle and buddy list reads.
#[derive(Debug, Clone)]
pub struct BuddyService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Buddy request repository.
    request_repo: Arc<BuddyRequestRepository>,
    /// Online window for presence classification in listings.
    online_window: Duration,
}

impl BuddyService {
    /// Creates a new buddy service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        request_repo: Arc<BuddyRequestRepository>,
        config: &PresenceConfig,
    ) -> Self {
        Self {
            user_repo,
            request_repo,
            online_window: Duration::seconds(config.online_window_seconds as i64),
        }
    }

    /// Send a buddy request to the named user.
    ///
    /// When a pending request already exists in the reverse direction,
    /// the two proposals are treated as a mutual collision: the reverse
    /// request is accepted and both buddy lists are linked in one
    /// transaction, and no new request row is created.
    pub async fn send_request(&self, ctx: &RequestContext, username: &str) -> AppResult<SendOutcome> {
        let target = self.resolve_user(username).await?;
        if target.id == ctx.user_id {
            return Err(AppError::validation("You cannot add yourself as a buddy"));
        }

        let caller = self
            .user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        if caller.is_buddy(target.id) {
            return Err(AppError::conflict(format!(
                "You are already buddies with '{}'",
                target.username
            )));
        }

        if self
            .request_repo
            .find_pending_between(ctx.user_id, target.id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "A pending buddy request to this user already exists",
            ));
        }

        if let Some(reverse) = self
            .request_repo
            .find_pending_between(target.id, ctx.user_id)
            .await?
        {
            let request = self.request_repo.accept_and_link(reverse.id).await?;
            info!(
                user_id = %ctx.user_id,
                buddy_id = %target.id,
                request_id = %request.id,
                "Mutual buddy requests resolved"
            );
            return Ok(SendOutcome::MutualAccepted {
                request,
                buddy: target,
            });
        }

        let request = self.request_repo.create(ctx.user_id, target.id).await?;
        info!(
            user_id = %ctx.user_id,
            recipient_id = %target.id,
            request_id = %request.id,
            "Buddy request sent"
        );
        Ok(SendOutcome::Sent { request })
    }

    /// Accept or reject a pending request addressed to the caller.
    pub async fn respond(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
        action: RequestAction,
    ) -> AppResult<BuddyRequest> {
        let request = self
            .request_repo
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found("Buddy request not found"))?;

        ensure_respondable(&request, ctx.user_id)?;

        let updated = match action {
            RequestAction::Accept => self.request_repo.accept_and_link(request.id).await?,
            RequestAction::Reject => self.request_repo.reject(request.id).await?,
        };

        info!(
            user_id = %ctx.user_id,
            request_id = %updated.id,
            status = %updated.status,
            "Buddy request resolved"
        );
        Ok(updated)
    }

    /// Remove the buddy relationship with the named user, on both sides.
    /// A no-op success when the relationship is already gone.
    pub async fn remove_buddy(&self, ctx: &RequestContext, username: &str) -> AppResult<()> {
        let target = self.resolve_user(username).await?;

        self.user_repo.unlink_buddies(ctx.user_id, target.id).await?;

        info!(
            user_id = %ctx.user_id,
            buddy_id = %target.id,
            "Buddy removed"
        );
        Ok(())
    }

    /// List the caller's buddies with computed presence.
    pub async fn list_buddies(&self, ctx: &RequestContext) -> AppResult<Vec<BuddyPresence>> {
        let caller = self
            .user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if caller.buddy_list.is_empty() {
            return Ok(Vec::new());
        }

        let users = self.user_repo.find_by_ids(&caller.buddy_list).await?;
        Ok(roster::assemble(&users, Utc::now(), self.online_window))
    }

    /// List all pending requests addressed to the caller.
    pub async fn list_pending(&self, ctx: &RequestContext) -> AppResult<Vec<PendingBuddyRequest>> {
        self.request_repo
            .find_pending_for_recipient(ctx.user_id)
            .await
    }

    /// Resolve a username to its user record.
    async fn resolve_user(&self, username: &str) -> AppResult<User> {
        self.user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))
    }
}

/// Check that the given user may resolve the request right now.
///
/// Only the recipient may respond, and only while the request is still
/// pending; terminal requests never transition again.
fn ensure_respondable(request: &BuddyRequest, responder_id: Uuid) -> AppResult<()> {
    if !request.is_addressed_to(responder_id) {
        return Err(AppError::forbidden(
            "Only the recipient can respond to this request",
        ));
    }
    if !request.is_pending() {
        return Err(AppError::invalid_state(format!(
            "This request has already been {}",
            request.status
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use retronet_core::error::ErrorKind;
    use retronet_entity::buddy::RequestStatus;

    fn request(recipient_id: Uuid, status: RequestStatus) -> BuddyRequest {
        let epoch = Utc.timestamp_opt(0, 0).unwrap();
        BuddyRequest {
            id: Uuid::new_v4(),
            requester_id: Uuid::new_v4(),
            recipient_id,
            status,
            created_at: epoch,
            updated_at: epoch,
        }
    }

    #[test]
    fn test_recipient_may_respond_to_pending() {
        let bob = Uuid::new_v4();
        assert!(ensure_respondable(&request(bob, RequestStatus::Pending), bob).is_ok());
    }

    #[test]
    fn test_non_recipient_is_forbidden() {
        let bob = Uuid::new_v4();
        let mallory = Uuid::new_v4();
        let err = ensure_respondable(&request(bob, RequestStatus::Pending), mallory).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[test]
    fn test_terminal_requests_cannot_be_resolved_again() {
        let bob = Uuid::new_v4();
        for status in [RequestStatus::Accepted, RequestStatus::Rejected] {
            let err = ensure_respondable(&request(bob, status), bob).unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidState);
        }
    }
}
