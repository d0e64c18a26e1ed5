//! # Pluma Infrastructure
//!
//! Concrete implementations of the ports defined in `pluma-core`.
//! This crate contains the token and password services, the asset store,
//! and the database adapters.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL persistence via SeaORM; without it
//!   only the in-memory repositories are available

pub mod assets;
pub mod auth;
pub mod database;

pub use assets::LocalAssetStore;
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, InMemoryPostRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use database::{PostgresPostRepository, PostgresUserRepository};

#[cfg(test)]
mod service_tests;
