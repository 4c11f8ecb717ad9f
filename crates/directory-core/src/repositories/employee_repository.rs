//! Employee repository trait (port)

use async_trait::async_trait;

use crate::domain::{Employee, EmployeeRole};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn insert(
        &self,
        company_id: i32,
        user_id: i32,
        role: EmployeeRole,
    ) -> Result<Employee, DomainError>;

    /// Active rows of one company joined with user identity, oldest first.
    async fn list_active(&self, company_id: i32) -> Result<Vec<Employee>, DomainError>;

    /// Matches on both ids; `false` when nothing matched.
    async fn deactivate(&self, company_id: i32, employee_id: i32) -> Result<bool, DomainError>;

    async fn update_role(
        &self,
        company_id: i32,
        employee_id: i32,
        role: EmployeeRole,
    ) -> Result<Option<Employee>, DomainError>;
}
