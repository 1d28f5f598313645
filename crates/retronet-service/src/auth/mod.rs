//! Identity boundary: login, logout, token refresh.

pub mod service;

pub use service::{AuthService, LoginResult};
