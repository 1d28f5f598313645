//! Domain entities for RetroNet: users, buddy requests, buddy groups,
//! and presence value objects.

pub mod buddy;
pub mod presence;
pub mod user;
