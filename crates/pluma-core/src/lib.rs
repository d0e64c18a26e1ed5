//! # Pluma Core
//!
//! The domain layer of the Pluma publishing backend.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod assets;
pub mod domain;
pub mod error;
pub mod identity;
pub mod ports;
pub mod service;
pub mod validate;

pub use error::DomainError;
pub use identity::ResolvedIdentity;
