//! Buddy relationship entities: directed requests and named groups.

pub mod group;
pub mod request;

pub use group::{BuddyGroup, UpdateBuddyGroup};
pub use request::{BuddyRequest, PendingBuddyRequest, RequestAction, RequestStatus};
