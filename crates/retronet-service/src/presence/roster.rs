//! Pure roster assembly for the presence snapshot.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use retronet_entity::buddy::BuddyGroup;
use retronet_entity::presence::{BuddyPresence, OnlineStatus};
use retronet_entity::user::User;

use super::evaluator;

/// Union the caller's buddy list with every group's member list,
/// de-duplicated in first-seen order.
///
/// Group members that are not in the buddy list are included on
/// purpose: groups are a superset view of the roster.
pub fn collect_roster_ids(buddy_list: &[Uuid], groups: &[BuddyGroup]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    let group_members = groups.iter().flat_map(|g| g.buddy_ids.iter());
    for id in buddy_list.iter().chain(group_members) {
        if seen.insert(*id) {
            ids.push(*id);
        }
    }

    ids
}

/// Classify every fetched roster member into a presence entry.
pub fn assemble(users: &[User], now: DateTime<Utc>, window: Duration) -> Vec<BuddyPresence> {
    users
        .iter()
        .map(|user| BuddyPresence {
            id: user.id,
            username: user.username.clone(),
            screen_name: user.screen_name.clone(),
            status: if evaluator::is_online(user, now, window) {
                OnlineStatus::Online
            } else {
                OnlineStatus::Offline
            },
            away_status: user.away_status.clone(),
            away_message: user.away_message.clone(),
            last_active_at: user.last_active_at,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn group(buddy_ids: Vec<Uuid>) -> BuddyGroup {
        let epoch = Utc.timestamp_opt(0, 0).unwrap();
        BuddyGroup {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Friends".to_string(),
            buddy_ids,
            sort_order: 0,
            created_at: epoch,
            updated_at: epoch,
        }
    }

    fn user(id: Uuid, last_active_at: Option<DateTime<Utc>>) -> User {
        let epoch = Utc.timestamp_opt(0, 0).unwrap();
        User {
            id,
            username: format!("user-{id}"),
            screen_name: Some("Screen".to_string()),
            password_hash: String::new(),
            status: None,
            away_status: Some("away".to_string()),
            away_message: Some("bbl".to_string()),
            buddy_list: Vec::new(),
            blocked_users: Vec::new(),
            last_active_at,
            manually_logged_off: false,
            created_at: epoch,
            updated_at: epoch,
            last_login_at: None,
        }
    }

    #[test]
    fn test_union_deduplicates() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();

        let ids = collect_roster_ids(&[a, b], &[group(vec![b, c]), group(vec![a])]);
        assert_eq!(ids, vec![a, b, c]);
    }

    #[test]
    fn test_group_only_members_are_included() {
        // Empty buddy list, one non-empty group: the group's members
        // still make it into the roster.
        let c = Uuid::new_v4();
        let ids = collect_roster_ids(&[], &[group(vec![c])]);
        assert_eq!(ids, vec![c]);
    }

    #[test]
    fn test_empty_state() {
        assert!(collect_roster_ids(&[], &[]).is_empty());
        assert!(assemble(&[], Utc::now(), Duration::seconds(30)).is_empty());
    }

    #[test]
    fn test_assemble_classifies_and_passes_display_fields() {
        let now = Utc::now();
        let online_id = Uuid::new_v4();
        let offline_id = Uuid::new_v4();
        let users = vec![
            user(online_id, Some(now - Duration::seconds(5))),
            user(offline_id, None),
        ];

        let entries = assemble(&users, now, Duration::seconds(30));
        assert_eq!(entries.len(), 2);

        let online = entries.iter().find(|e| e.id == online_id).unwrap();
        assert_eq!(online.status, OnlineStatus::Online);
        assert_eq!(online.away_status.as_deref(), Some("away"));
        assert_eq!(online.away_message.as_deref(), Some("bbl"));

        let offline = entries.iter().find(|e| e.id == offline_id).unwrap();
        assert_eq!(offline.status, OnlineStatus::Offline);
        assert!(offline.last_active_at.is_none());
    }
}
