//! HTTP API layer for RetroNet: router, handlers, DTOs, extractors,
//! middleware, and the `AppError` → HTTP response mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use state::AppState;
