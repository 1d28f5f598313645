//! Pure presence classification.

use chrono::{DateTime, Duration, Utc};

use retronet_entity::user::User;

/// Classify a user as online or offline from their heartbeat state.
///
/// A user is online iff they have not manually logged off, a heartbeat
/// exists, and the heartbeat is strictly younger than `window`. A
/// missing heartbeat or an explicit logoff is offline regardless of
/// elapsed time. No I/O, no side effects.
pub fn is_online(user: &User, now: DateTime<Utc>, window: Duration) -> bool {
    if user.manually_logged_off {
        return false;
    }
    match user.last_active_at {
        Some(last_active) => now.signed_duration_since(last_active) < window,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn user(last_active_at: Option<DateTime<Utc>>, manually_logged_off: bool) -> User {
        let epoch = Utc.timestamp_opt(0, 0).unwrap();
        User {
            id: Uuid::new_v4(),
            username: "carol".to_string(),
            screen_name: None,
            password_hash: String::new(),
            status: None,
            away_status: None,
            away_message: None,
            buddy_list: Vec::new(),
            blocked_users: Vec::new(),
            last_active_at,
            manually_logged_off,
            created_at: epoch,
            updated_at: epoch,
            last_login_at: None,
        }
    }

    fn window() -> Duration {
        Duration::seconds(30)
    }

    #[test]
    fn test_offline_without_heartbeat() {
        let now = Utc::now();
        assert!(!is_online(&user(None, false), now, window()));
    }

    #[test]
    fn test_offline_when_manually_logged_off() {
        let now = Utc::now();
        // A fresh heartbeat does not override an explicit logoff.
        assert!(!is_online(&user(Some(now), true), now, window()));
    }

    #[test]
    fn test_online_within_window() {
        let now = Utc::now();
        let heartbeat = now - Duration::seconds(20);
        assert!(is_online(&user(Some(heartbeat), false), now, window()));
    }

    #[test]
    fn test_offline_at_window_boundary() {
        let now = Utc::now();
        // Strictly-less-than: exactly 30 seconds old is offline.
        let heartbeat = now - Duration::seconds(30);
        assert!(!is_online(&user(Some(heartbeat), false), now, window()));
    }

    #[test]
    fn test_offline_past_window() {
        let now = Utc::now();
        let heartbeat = now - Duration::seconds(35);
        assert!(!is_online(&user(Some(heartbeat), false), now, window()));
    }

    #[test]
    fn test_heartbeat_timeline() {
        // carol heartbeats at T=0; a buddy polls at T=20s and T=35s.
        let t0 = Utc.timestamp_opt(1_000_000, 0).unwrap();
        let carol = user(Some(t0), false);

        assert!(is_online(&carol, t0 + Duration::seconds(20), window()));
        assert!(!is_online(&carol, t0 + Duration::seconds(35), window()));
    }
}
