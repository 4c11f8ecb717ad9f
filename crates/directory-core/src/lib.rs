//! # Directory Core
//! 
//! Domain entities, services, and the repository and provider traits of the
//! company directory.

pub mod domain;
pub mod error;
pub mod partial_update;
pub mod providers;
pub mod repositories;
pub mod services;
pub mod validation;

// Re-export domain entities
pub use domain::*;
pub use error::{DomainError, FieldViolation};
