//! Buddy group repository implementation.
//!
//! Every lookup is ownership-scoped: the owner id is part of the WHERE
//! predicate, so a group belonging to another user is indistinguishable
//! from a group that does not exist.

use sqlx::PgPool;
use uuid::Uuid;

use retronet_core::error::{AppError, ErrorKind};
use retronet_core::result::AppResult;
use retronet_entity::buddy::{BuddyGroup, UpdateBuddyGroup};

/// Repository for named, ordered buddy groups.
#[derive(Debug, Clone)]
pub struct BuddyGroupRepository {
    pool: PgPool,
}

impl BuddyGroupRepository {
    /// Create a new buddy group repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a group for the owner. When `sort_order` is omitted, the
    /// group is placed after the owner's current last group (0 for the
    /// first one); the default is computed inside the INSERT so two
    /// concurrent creates cannot observe the same maximum.
    pub async fn create(
        &self,
        owner_id: Uuid,
        name: &str,
        sort_order: Option<i32>,
    ) -> AppResult<BuddyGroup> {
        sqlx::query_as::<_, BuddyGroup>(
            "INSERT INTO buddy_groups (user_id, name, sort_order) \
             VALUES ($1, $2, COALESCE($3, (SELECT COALESCE(MAX(sort_order) + 1, 0) \
                                           FROM buddy_groups WHERE user_id = $1))) \
             RETURNING *",
        )
        .bind(owner_id)
        .bind(name)
        .bind(sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create buddy group", e))
    }

    /// Partially update an owned group. `None` fields are unchanged;
    /// `buddy_ids` is replaced wholesale. Returns `None` when no group
    /// with that id is owned by the caller.
    pub async fn update(
        &self,
        owner_id: Uuid,
        group_id: Uuid,
        data: &UpdateBuddyGroup,
    ) -> AppResult<Option<BuddyGroup>> {
        sqlx::query_as::<_, BuddyGroup>(
            "UPDATE buddy_groups SET name = COALESCE($3, name), \
                                     buddy_ids = COALESCE($4, buddy_ids), \
                                     sort_order = COALESCE($5, sort_order), \
                                     updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING *",
        )
        .bind(group_id)
        .bind(owner_id)
        .bind(&data.name)
        .bind(&data.buddy_ids)
        .bind(data.sort_order)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update buddy group", e))
    }

    /// Delete an owned group. Returns `false` when no group with that id
    /// is owned by the caller.
    pub async fn delete(&self, owner_id: Uuid, group_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM buddy_groups WHERE id = $1 AND user_id = $2")
            .bind(group_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete buddy group", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    /// List the owner's groups, ascending by sort order.
    pub async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<BuddyGroup>> {
        sqlx::query_as::<_, BuddyGroup>(
            "SELECT * FROM buddy_groups WHERE user_id = $1 ORDER BY sort_order ASC, created_at ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list buddy groups", e))
    }
}
