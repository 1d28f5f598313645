//! Business logic services for RetroNet.
//!
//! Each service owns one area of the engine: the identity boundary
//! (auth), profile self-service, the buddy request lifecycle, block
//! lists, buddy groups, and the presence aggregator. Services validate
//! before mutating and delegate all SQL to the repository layer.

pub mod auth;
pub mod block;
pub mod buddy;
pub mod context;
pub mod group;
pub mod presence;
pub mod user;

pub use context::RequestContext;
