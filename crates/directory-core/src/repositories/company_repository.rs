//! Company repository trait (port)

use async_trait::async_trait;

use crate::domain::{Company, CompanyFilter, NewCompany};
use crate::error::DomainError;
use crate::partial_update::PartialUpdate;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Inserts an active, unverified company and returns the stored row.
    async fn insert(&self, company: &NewCompany, created_by: i32) -> Result<Company, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Company>, DomainError>;

    /// Newest first.
    async fn list(&self, filter: &CompanyFilter) -> Result<Vec<Company>, DomainError>;

    /// Writes exactly the assigned columns; `None` when no row has `id`.
    async fn update(&self, id: i32, update: &PartialUpdate) -> Result<Option<Company>, DomainError>;

    /// Clears `is_active`; `false` when no row has `id`.
    async fn soft_delete(&self, id: i32) -> Result<bool, DomainError>;

    async fn mark_verified(&self, id: i32) -> Result<Option<Company>, DomainError>;
}
