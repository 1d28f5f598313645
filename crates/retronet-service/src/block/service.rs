//! Block list manager.
//!
//! Blocking is independent of the buddy graph: it neither removes an
//! existing buddy relationship nor prevents future buddy requests.
//! Callers that need both signals consult both lists.

use std::sync::Arc;

use tracing::info;

use retronet_core::error::AppError;
use retronet_core::result::AppResult;
use retronet_database::repositories::user::UserRepository;
use retronet_entity::user::User;

use crate::context::RequestContext;

/// Handles blocked-set mutations and listing.
#[derive(Debug, Clone)]
pub struct BlockService {
    /// User repository.
    user_repo: Arc<UserRepository>,
}

impl BlockService {
    /// Creates a new block service.
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Block the named user. Succeeds without mutation when the target
    /// is already blocked.
    pub async fn block(&self, ctx: &RequestContext, username: &str) -> AppResult<()> {
        let target = self.resolve_user(username).await?;
        if target.id == ctx.user_id {
            return Err(AppError::validation("You cannot block yourself"));
        }

        let added = self.user_repo.add_blocked(ctx.user_id, target.id).await?;
        if added {
            info!(
                user_id = %ctx.user_id,
                blocked_id = %target.id,
                "User blocked"
            );
        }
        Ok(())
    }

    /// Unblock the named user. Succeeds without mutation when the
    /// target is not currently blocked.
    pub async fn unblock(&self, ctx: &RequestContext, username: &str) -> AppResult<()> {
        let target = self.resolve_user(username).await?;

        let removed = self.user_repo.remove_blocked(ctx.user_id, target.id).await?;
        if removed {
            info!(
                user_id = %ctx.user_id,
                unblocked_id = %target.id,
                "User unblocked"
            );
        }
        Ok(())
    }

    /// List the resolved identities of every blocked user.
    pub async fn list_blocked(&self, ctx: &RequestContext) -> AppResult<Vec<User>> {
        let caller = self
            .user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if caller.blocked_users.is_empty() {
            return Ok(Vec::new());
        }

        self.user_repo.find_by_ids(&caller.blocked_users).await
    }

    /// Resolve a username to its user record.
    async fn resolve_user(&self, username: &str) -> AppResult<User> {
        self.user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))
    }
}
