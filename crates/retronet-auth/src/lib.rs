//! Authentication primitives for RetroNet: Argon2id password hashing
//! and JWT access/refresh token handling.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair, TokenType};
pub use password::PasswordHasher;
