//! `AuthProvider` backed by [`JwtService`] and [`PasswordService`].

use tracing::{error, warn};

use directory_core::providers::AuthProvider;
use directory_core::{DomainError, Principal};

use crate::jwt::{JwtError, JwtService};
use crate::password::PasswordService;

pub struct JwtAuthProvider {
    jwt: JwtService,
    passwords: PasswordService,
}

impl JwtAuthProvider {
    pub fn new(secret: &str, token_expiry_hours: i64, bcrypt_cost: u32) -> Self {
        Self {
            jwt: JwtService::new(secret, token_expiry_hours),
            passwords: PasswordService::new(bcrypt_cost),
        }
    }
}

impl AuthProvider for JwtAuthProvider {
    fn authenticate(&self, token: &str) -> Result<Principal, DomainError> {
        let claims = self.jwt.validate_token(token).map_err(|e| {
            warn!("Token rejected: {}", e);
            match e {
                JwtError::TokenExpired => DomainError::Unauthorized("Token expired".into()),
                _ => DomainError::Unauthorized("Invalid token".into()),
            }
        })?;
        claims.principal().map_err(|e| {
            warn!("Token rejected: {}", e);
            DomainError::Unauthorized("Invalid token".into())
        })
    }

    fn issue_token(&self, principal: &Principal) -> Result<String, DomainError> {
        self.jwt.generate_token(principal).map_err(|e| {
            error!("Token generation failed: {}", e);
            DomainError::InternalError(e.to_string())
        })
    }

    fn hash_password(&self, password: &str) -> Result<String, DomainError> {
        self.passwords.hash(password).map_err(|e| {
            error!("Password hashing failed: {}", e);
            DomainError::InternalError(e.to_string())
        })
    }

    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        // an unreadable stored hash can never match
        Ok(self.passwords.verify(password, hash).unwrap_or_else(|e| {
            warn!("Stored password hash unreadable: {}", e);
            false
        }))
    }
}
