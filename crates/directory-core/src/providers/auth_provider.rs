//! Token and password mechanism used by the account service and the HTTP layer.

use crate::domain::Principal;
use crate::error::DomainError;

/// Issues and verifies bearer tokens and hashes passwords.
///
/// `authenticate` fails with `Unauthorized` for any token it cannot verify,
/// including expired ones.
#[cfg_attr(test, mockall::automock)]
pub trait AuthProvider: Send + Sync {
    fn authenticate(&self, token: &str) -> Result<Principal, DomainError>;

    fn issue_token(&self, principal: &Principal) -> Result<String, DomainError>;

    fn hash_password(&self, password: &str) -> Result<String, DomainError>;

    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}
