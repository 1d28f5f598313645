//! Buddy request repository implementation.
//!
//! Accepting a request mutates three rows: the request itself and both
//! users' buddy lists. Those writes run inside one transaction whose
//! status flip is guarded on `status = 'pending'`, so a concurrent
//! responder (or the mutual-collision path racing the recipient) can
//! never double-resolve a request or leave a one-sided friendship.

use sqlx::PgPool;
use uuid::Uuid;

use retronet_core::error::{AppError, ErrorKind};
use retronet_core::result::AppResult;
use retronet_entity::buddy::{BuddyRequest, PendingBuddyRequest};

/// Name of the partial unique index enforcing one pending request per
/// ordered (requester, recipient) pair.
const PENDING_PAIR_INDEX: &str = "buddy_requests_pending_pair_idx";

/// Repository for the directed buddy-request lifecycle.
#[derive(Debug, Clone)]
pub struct BuddyRequestRepository {
    pool: PgPool,
}

impl BuddyRequestRepository {
    /// Create a new buddy request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a request by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BuddyRequest>> {
        sqlx::query_as::<_, BuddyRequest>("SELECT * FROM buddy_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find buddy request", e)
            })
    }

    /// Find the pending request for an ordered (requester, recipient) pair.
    pub async fn find_pending_between(
        &self,
        requester_id: Uuid,
        recipient_id: Uuid,
    ) -> AppResult<Option<BuddyRequest>> {
        sqlx::query_as::<_, BuddyRequest>(
            "SELECT * FROM buddy_requests \
             WHERE requester_id = $1 AND recipient_id = $2 AND status = 'pending'",
        )
        .bind(requester_id)
        .bind(recipient_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to look up pending request", e)
        })
    }

    /// List all pending requests addressed to the given recipient,
    /// joined with each requester's public identity, oldest first.
    pub async fn find_pending_for_recipient(
        &self,
        recipient_id: Uuid,
    ) -> AppResult<Vec<PendingBuddyRequest>> {
        sqlx::query_as::<_, PendingBuddyRequest>(
            "SELECT r.id, r.requester_id, \
                    u.username AS requester_username, \
                    u.screen_name AS requester_screen_name, \
                    r.created_at \
             FROM buddy_requests r \
             JOIN users u ON u.id = r.requester_id \
             WHERE r.recipient_id = $1 AND r.status = 'pending' \
             ORDER BY r.created_at ASC",
        )
        .bind(recipient_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list pending requests", e)
        })
    }

    /// Create a fresh pending request.
    ///
    /// A unique violation on the pending-pair index means another request
    /// for the same pair slipped in concurrently; it is reported as the
    /// same conflict the caller's pre-check would have produced.
    pub async fn create(&self, requester_id: Uuid, recipient_id: Uuid) -> AppResult<BuddyRequest> {
        sqlx::query_as::<_, BuddyRequest>(
            "INSERT INTO buddy_requests (requester_id, recipient_id) \
             VALUES ($1, $2) \
             RETURNING *",
        )
        .bind(requester_id)
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some(PENDING_PAIR_INDEX) =>
            {
                AppError::conflict("A pending buddy request to this user already exists")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create buddy request", e),
        })
    }

    /// Accept a pending request and link both buddy lists, atomically.
    ///
    /// The whole operation commits or none of it does: the status flip
    /// (guarded on `pending`) and the two idempotent buddy-list inserts
    /// share one transaction. Returns `InvalidState` when the request
    /// was already resolved by the time the transaction ran.
    pub async fn accept_and_link(&self, request_id: Uuid) -> AppResult<BuddyRequest> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let request = sqlx::query_as::<_, BuddyRequest>(
            "UPDATE buddy_requests SET status = 'accepted', updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' \
             RETURNING *",
        )
        .bind(request_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to accept buddy request", e)
        })?
        .ok_or_else(|| AppError::invalid_state("Buddy request is no longer pending"))?;

        for (owner, buddy) in [
            (request.requester_id, request.recipient_id),
            (request.recipient_id, request.requester_id),
        ] {
            sqlx::query(
                "UPDATE users SET buddy_list = array_append(buddy_list, $2), \
                                  updated_at = NOW() \
                 WHERE id = $1 AND NOT (buddy_list @> ARRAY[$2]::uuid[])",
            )
            .bind(owner)
            .bind(buddy)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to link buddy lists", e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit buddy acceptance", e)
        })?;

        Ok(request)
    }

    /// Reject a pending request. No buddy-list mutation.
    ///
    /// Returns `InvalidState` when the request is no longer pending.
    pub async fn reject(&self, request_id: Uuid) -> AppResult<BuddyRequest> {
        sqlx::query_as::<_, BuddyRequest>(
            "UPDATE buddy_requests SET status = 'rejected', updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' \
             RETURNING *",
        )
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to reject buddy request", e)
        })?
        .ok_or_else(|| AppError::invalid_state("Buddy request is no longer pending"))
    }
}
