//! Repository implementations, one per aggregate.

pub mod buddy_group;
pub mod buddy_request;
pub mod user;

pub use buddy_group::BuddyGroupRepository;
pub use buddy_request::BuddyRequestRepository;
pub use user::UserRepository;
