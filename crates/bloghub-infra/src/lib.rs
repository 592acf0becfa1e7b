//! # BlogHub Infrastructure
//!
//! Concrete implementations of the ports defined in `bloghub-core`:
//! PostgreSQL repositories via SeaORM, JWT session tokens, and Argon2
//! password hashing.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, DatabaseConnections};
