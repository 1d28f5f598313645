//! Buddy request lifecycle and buddy list management.

pub mod service;

pub use service::{BuddyService, SendOutcome};
