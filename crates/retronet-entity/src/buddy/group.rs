//! Named, ordered buddy group entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user-owned, named collection of buddy references.
///
/// `buddy_ids` is an ordered sequence of opaque user ids; entries are
/// not required to correspond to accepted buddy relationships, and
/// duplicates are tolerated. Groups exist for display organization only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BuddyGroup {
    /// Unique group identifier.
    pub id: Uuid,
    /// Owning user. Groups are visible and mutable only to their owner.
    pub user_id: Uuid,
    /// Group name, non-empty after trimming.
    pub name: String,
    /// Ordered member references.
    pub buddy_ids: Vec<Uuid>,
    /// Display position among the owner's groups, ascending.
    pub sort_order: i32,
    /// When the group was created.
    pub created_at: DateTime<Utc>,
    /// When the group was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Partial update of a buddy group.
///
/// `None` fields are unchanged; `buddy_ids` is replaced wholesale when
/// present, never merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBuddyGroup {
    /// New name.
    pub name: Option<String>,
    /// Replacement member list.
    pub buddy_ids: Option<Vec<Uuid>>,
    /// New display position.
    pub sort_order: Option<i32>,
}
