//! Core building blocks shared by every RetroNet crate: configuration
//! schemas, the unified error type, and the common result alias.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
