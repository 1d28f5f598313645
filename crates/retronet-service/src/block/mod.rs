//! Block list management.

pub mod service;

pub use service::BlockService;
