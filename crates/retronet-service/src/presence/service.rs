//! The presence aggregator — serves the polling ping.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::debug;

use retronet_core::config::presence::PresenceConfig;
use retronet_core::error::AppError;
use retronet_database::repositories::buddy_group::BuddyGroupRepository;
use retronet_database::repositories::user::UserRepository;
use retronet_entity::presence::RosterSnapshot;

use crate::context::RequestContext;

use super::roster;

/// Aggregates heartbeat refresh, roster union, and presence
/// classification into the single snapshot a polling client consumes.
#[derive(Debug, Clone)]
pub struct PresenceService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Buddy group repository.
    group_repo: Arc<BuddyGroupRepository>,
    /// Online window from configuration.
    online_window: Duration,
}

impl PresenceService {
    /// Creates a new presence service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        group_repo: Arc<BuddyGroupRepository>,
        config: &PresenceConfig,
    ) -> Self {
        Self {
            user_repo,
            group_repo,
            online_window: Duration::seconds(config.online_window_seconds as i64),
        }
    }

    /// Refresh the caller's heartbeat and return the consolidated
    /// presence snapshot for every referenced buddy.
    ///
    /// Groups are loaded even when the buddy list is empty: group
    /// membership alone puts a user on the roster.
    pub async fn ping(&self, ctx: &RequestContext) -> Result<RosterSnapshot, AppError> {
        let caller = self
            .user_repo
            .touch_heartbeat(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let groups = self.group_repo.find_by_owner(ctx.user_id).await?;

        let roster_ids = roster::collect_roster_ids(&caller.buddy_list, &groups);
        let users = if roster_ids.is_empty() {
            Vec::new()
        } else {
            self.user_repo.find_by_ids(&roster_ids).await?
        };

        let buddies = roster::assemble(&users, Utc::now(), self.online_window);

        debug!(
            user_id = %ctx.user_id,
            buddies = buddies.len(),
            groups = groups.len(),
            "Presence ping served"
        );

        Ok(RosterSnapshot { buddies, groups })
    }
}
