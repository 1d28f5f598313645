//! Presence value objects.

pub mod model;

pub use model::{BuddyPresence, OnlineStatus, RosterSnapshot};
