// ============================================================================
// Directory Core - Workforce Service
// File: crates/directory-core/src/services/workforce_service.rs
// ============================================================================
//! Employee association lifecycle. Associations go from active to inactive and
//! are never reactivated; roles may change freely.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{Employee, EmployeeRole};
use crate::error::DomainError;
use crate::repositories::EmployeeRepository;

pub struct WorkforceService {
    employees: Arc<dyn EmployeeRepository>,
}

impl WorkforceService {
    pub fn new(employees: Arc<dyn EmployeeRepository>) -> Self {
        Self { employees }
    }

    /// Associates a user with a company. Neither id is checked for existence;
    /// the same pair may be added more than once.
    pub async fn add_employee(
        &self,
        company_id: i32,
        user_id: i32,
        role: Option<EmployeeRole>,
    ) -> Result<Employee, DomainError> {
        if company_id <= 0 {
            warn!(company_id, "Add employee rejected: invalid company id");
            return Err(DomainError::InvalidInput(format!(
                "company_id must be positive, got {}",
                company_id
            )));
        }
        if user_id <= 0 {
            warn!(company_id, user_id, "Add employee rejected: invalid user id");
            return Err(DomainError::InvalidInput(format!(
                "user_id must be positive, got {}",
                user_id
            )));
        }

        let role = role.unwrap_or_default();
        let employee = self.employees.insert(company_id, user_id, role).await?;
        info!(
            company_id,
            user_id,
            employee_id = employee.id,
            role = role.as_str(),
            "Employee added"
        );
        Ok(employee)
    }

    /// Active associations only, oldest first.
    pub async fn list_employees(&self, company_id: i32) -> Result<Vec<Employee>, DomainError> {
        self.employees.list_active(company_id).await
    }

    /// Deactivates the association only when it belongs to `company_id`.
    pub async fn remove_employee(
        &self,
        company_id: i32,
        employee_id: i32,
    ) -> Result<bool, DomainError> {
        let removed = self.employees.deactivate(company_id, employee_id).await?;
        if removed {
            info!(company_id, employee_id, "Employee removed");
        } else {
            warn!(company_id, employee_id, "Employee not found for removal");
        }
        Ok(removed)
    }

    pub async fn update_role(
        &self,
        company_id: i32,
        employee_id: i32,
        role: EmployeeRole,
    ) -> Result<Employee, DomainError> {
        let employee = self
            .employees
            .update_role(company_id, employee_id, role)
            .await?
            .ok_or(DomainError::EmployeeNotFound {
                company_id,
                employee_id,
            })?;

        info!(company_id, employee_id, role = role.as_str(), "Employee role updated");
        Ok(employee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewUser, UserRole};
    use crate::repositories::{InMemoryStore, MockEmployeeRepository, UserRepository};
    use std::time::Duration;

    async fn seeded_store(users: usize) -> (Arc<InMemoryStore>, Vec<i32>) {
        let store = Arc::new(InMemoryStore::new());
        let mut ids = Vec::new();
        for i in 0..users {
            let user = store
                .create(&NewUser {
                    email: format!("user{}@example.com", i),
                    password_hash: "hash".to_string(),
                    first_name: format!("First{}", i),
                    last_name: "Last".to_string(),
                    phone: None,
                    role: UserRole::Customer,
                })
                .await
                .unwrap();
            ids.push(user.id);
        }
        (store, ids)
    }

    #[tokio::test]
    async fn test_negative_user_id_is_invalid_input() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_insert().never();
        let service = WorkforceService::new(Arc::new(repo));

        assert!(matches!(
            service.add_employee(3, -1, None).await,
            Err(DomainError::InvalidInput(_))
        ));
        assert!(matches!(
            service.add_employee(0, 5, None).await,
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_role_defaults_to_staff() {
        let (store, users) = seeded_store(1).await;
        let service = WorkforceService::new(store);

        let employee = service.add_employee(1, users[0], None).await.unwrap();
        assert_eq!(employee.role, EmployeeRole::Staff);
        assert!(employee.is_active);
    }

    #[tokio::test]
    async fn test_list_orders_oldest_first_and_skips_inactive() {
        let (store, users) = seeded_store(4).await;
        let service = WorkforceService::new(store);

        let mut added = Vec::new();
        for user_id in &users {
            added.push(service.add_employee(2, *user_id, None).await.unwrap().id);
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        assert!(service.remove_employee(2, added[1]).await.unwrap());

        let listed: Vec<i32> = service
            .list_employees(2)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(listed, vec![added[0], added[2], added[3]]);
    }

    #[tokio::test]
    async fn test_cross_company_remove_does_nothing() {
        let (store, users) = seeded_store(1).await;
        let service = WorkforceService::new(store);
        let employee = service.add_employee(1, users[0], None).await.unwrap();

        assert!(!service.remove_employee(2, employee.id).await.unwrap());
        let listed = service.list_employees(1).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].is_active);
    }

    #[tokio::test]
    async fn test_duplicate_pairs_are_allowed() {
        let (store, users) = seeded_store(1).await;
        let service = WorkforceService::new(store);

        service.add_employee(1, users[0], None).await.unwrap();
        service
            .add_employee(1, users[0], Some(EmployeeRole::Manager))
            .await
            .unwrap();
        assert_eq!(service.list_employees(1).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_role_scoped_to_company() {
        let (store, users) = seeded_store(1).await;
        let service = WorkforceService::new(store);
        let employee = service.add_employee(1, users[0], None).await.unwrap();

        let promoted = service
            .update_role(1, employee.id, EmployeeRole::Owner)
            .await
            .unwrap();
        assert_eq!(promoted.role, EmployeeRole::Owner);
        assert!(promoted.is_active);

        assert!(matches!(
            service.update_role(9, employee.id, EmployeeRole::Staff).await,
            Err(DomainError::EmployeeNotFound { company_id: 9, .. })
        ));
    }
}
