//! Buddy group organizer.
//!
//! Groups are display-only collections of opaque user-id references;
//! membership is never validated against the owner's buddy list. All
//! lookups are ownership-scoped so a foreign group id reads as missing.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use retronet_core::error::AppError;
use retronet_core::result::AppResult;
use retronet_database::repositories::buddy_group::BuddyGroupRepository;
use retronet_entity::buddy::{BuddyGroup, UpdateBuddyGroup};

use crate::context::RequestContext;

/// Handles named, ordered buddy groups.
#[derive(Debug, Clone)]
pub struct GroupService {
    /// Buddy group repository.
    group_repo: Arc<BuddyGroupRepository>,
}

impl GroupService {
    /// Creates a new group service.
    pub fn new(group_repo: Arc<BuddyGroupRepository>) -> Self {
        Self { group_repo }
    }

    /// Create a group. Omitted `sort_order` places the group last.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        name: &str,
        sort_order: Option<i32>,
    ) -> AppResult<BuddyGroup> {
        let name = normalize_group_name(name)?;

        let group = self.group_repo.create(ctx.user_id, &name, sort_order).await?;
        info!(
            user_id = %ctx.user_id,
            group_id = %group.id,
            "Buddy group created"
        );
        Ok(group)
    }

    /// Partially update an owned group. `buddy_ids` is replaced
    /// wholesale when present.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        group_id: Uuid,
        mut data: UpdateBuddyGroup,
    ) -> AppResult<BuddyGroup> {
        if let Some(name) = data.name.take() {
            data.name = Some(normalize_group_name(&name)?);
        }

        self.group_repo
            .update(ctx.user_id, group_id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Buddy group not found"))
    }

    /// Delete an owned group.
    pub async fn delete(&self, ctx: &RequestContext, group_id: Uuid) -> AppResult<()> {
        let deleted = self.group_repo.delete(ctx.user_id, group_id).await?;
        if !deleted {
            return Err(AppError::not_found("Buddy group not found"));
        }

        info!(
            user_id = %ctx.user_id,
            group_id = %group_id,
            "Buddy group deleted"
        );
        Ok(())
    }

    /// List the caller's groups, ascending by sort order.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<BuddyGroup>> {
        self.group_repo.find_by_owner(ctx.user_id).await
    }
}

/// Trim a group name and reject empty results.
fn normalize_group_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Group name cannot be empty"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use retronet_core::error::ErrorKind;

    #[test]
    fn test_name_is_trimmed() {
        assert_eq!(normalize_group_name("  School Friends ").unwrap(), "School Friends");
    }

    #[test]
    fn test_empty_name_is_rejected() {
        for name in ["", "   ", "\t\n"] {
            let err = normalize_group_name(name).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
        }
    }
}
