//! # Directory Shared
//! 
//! Configuration, telemetry, and small helpers shared by every directory crate.

pub mod constants;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::AppError;
