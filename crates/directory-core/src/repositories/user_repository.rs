//! User repository trait (port)

use async_trait::async_trait;

use crate::domain::{NewUser, User};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;
    async fn update_password(&self, id: i32, password_hash: &str) -> Result<bool, DomainError>;
}
