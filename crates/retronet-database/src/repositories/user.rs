//! User repository implementation.
//!
//! Buddy-list and blocked-list membership changes are single-statement
//! guarded array updates: the membership test and the mutation happen in
//! one UPDATE, so concurrent mutators cannot lose each other's writes
//! and repeated application is a no-op.

use sqlx::PgPool;
use uuid::Uuid;

use retronet_core::error::{AppError, ErrorKind};
use retronet_core::result::AppResult;
use retronet_entity::user::{UpdateProfile, User};

/// Repository for user lookup, heartbeat, and relationship-set mutations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by username (case-insensitive).
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(username) = LOWER($1)")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    /// Bulk-fetch users by id set, ordered by username for stable output.
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE id = ANY($1) ORDER BY LOWER(username) ASC",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to bulk-fetch users", e))
    }

    /// Refresh the caller's heartbeat and clear the manual-logoff flag.
    ///
    /// Returns the updated row, or `None` when the account no longer exists.
    pub async fn touch_heartbeat(&self, user_id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET last_active_at = NOW(), \
                              manually_logged_off = FALSE, \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to refresh heartbeat", e))
    }

    /// Record a successful login: stamp `last_login_at`, refresh the
    /// heartbeat, and clear the manual-logoff flag.
    pub async fn record_login(&self, user_id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET last_login_at = NOW(), \
                              last_active_at = NOW(), \
                              manually_logged_off = FALSE, \
                              updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record login", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        Ok(())
    }

    /// Set the manual-logoff flag, forcing the user offline.
    pub async fn set_logged_off(&self, user_id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET manually_logged_off = TRUE, updated_at = NOW() WHERE id = $1",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to set logoff flag", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        Ok(())
    }

    /// Update a user's display fields.
    pub async fn update_profile(&self, data: &UpdateProfile) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET screen_name = COALESCE($2, screen_name), \
                              status = COALESCE($3, status), \
                              away_status = COALESCE($4, away_status), \
                              away_message = COALESCE($5, away_message), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(data.id)
        .bind(&data.screen_name)
        .bind(&data.status)
        .bind(&data.away_status)
        .bind(&data.away_message)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update profile", e))?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", data.id)))
    }

    /// Remove the buddy edge between two users on both sides, in one
    /// transaction. A no-op for sides that do not hold the edge.
    pub async fn unlink_buddies(&self, a: Uuid, b: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query(
            "UPDATE users SET buddy_list = array_remove(buddy_list, $2), updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(a)
        .bind(b)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to unlink buddy", e))?;

        sqlx::query(
            "UPDATE users SET buddy_list = array_remove(buddy_list, $2), updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(b)
        .bind(a)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to unlink buddy", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit buddy unlink", e)
        })
    }

    /// Add a user to the owner's blocked set. Returns `false` when the
    /// target was already blocked.
    pub async fn add_blocked(&self, owner_id: Uuid, target_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET blocked_users = array_append(blocked_users, $2), \
                              updated_at = NOW() \
             WHERE id = $1 AND NOT (blocked_users @> ARRAY[$2]::uuid[])",
        )
        .bind(owner_id)
        .bind(target_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to block user", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove a user from the owner's blocked set. Returns `false` when
    /// the target was not blocked.
    pub async fn remove_blocked(&self, owner_id: Uuid, target_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET blocked_users = array_remove(blocked_users, $2), \
                              updated_at = NOW() \
             WHERE id = $1 AND blocked_users @> ARRAY[$2]::uuid[]",
        )
        .bind(owner_id)
        .bind(target_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to unblock user", e))?;

        Ok(result.rows_affected() > 0)
    }
}
