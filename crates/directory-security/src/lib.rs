//! # Directory Security
//! 
//! JWT issuance and verification, bcrypt password hashing, and the
//! `AuthProvider` built from them.

pub mod jwt;
pub mod password;
pub mod provider;

pub use jwt::{Claims, JwtError, JwtService};
pub use password::{PasswordError, PasswordService};
pub use provider::JwtAuthProvider;
