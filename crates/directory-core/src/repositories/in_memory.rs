//! In-memory implementation of every repository port.
//!
//! Each operation takes the table lock once, so a single call is atomic in the
//! same way a single SQL statement is.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::domain::{Company, CompanyFilter, Employee, EmployeeRole, NewCompany, NewUser, User};
use crate::error::DomainError;
use crate::partial_update::PartialUpdate;
use crate::repositories::{CompanyRepository, EmployeeRepository, UserRepository};

#[derive(Default)]
struct Tables {
    companies: Vec<Company>,
    employees: Vec<Employee>,
    users: Vec<User>,
    next_company_id: i32,
    next_employee_id: i32,
    next_user_id: i32,
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

/// Shared in-memory store; one instance backs all three repository traits.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompanyRepository for InMemoryStore {
    async fn insert(&self, company: &NewCompany, created_by: i32) -> Result<Company, DomainError> {
        let mut tables = self.tables.write();
        let now = Utc::now();
        let row = Company {
            id: next_id(&mut tables.next_company_id),
            name: company.name.clone(),
            description: company.description.clone(),
            phone: company.phone.clone(),
            email: company.email.clone(),
            website: company.website.clone(),
            address_line: company.address_line.clone(),
            province_id: company.province_id,
            province_name: company.province_name.clone(),
            district_id: company.district_id,
            district_name: company.district_name.clone(),
            neighborhood_id: company.neighborhood_id,
            neighborhood_name: company.neighborhood_name.clone(),
            postal_code: company.postal_code.clone(),
            latitude: company.latitude,
            longitude: company.longitude,
            bank_name: company.bank_name.clone(),
            bank_branch: company.bank_branch.clone(),
            iban: company.iban.clone(),
            account_holder_name: company.account_holder_name.clone(),
            commission_rate: company.commission_rate.unwrap_or(0.0),
            payment_enabled: company.payment_enabled.unwrap_or(false),
            is_active: true,
            is_verified: false,
            created_by,
            created_at: now,
            updated_at: now,
        };
        tables.companies.push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Company>, DomainError> {
        Ok(self.tables.read().companies.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self, filter: &CompanyFilter) -> Result<Vec<Company>, DomainError> {
        let tables = self.tables.read();
        let mut companies: Vec<Company> = tables
            .companies
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        companies.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(companies)
    }

    async fn update(&self, id: i32, update: &PartialUpdate) -> Result<Option<Company>, DomainError> {
        let mut tables = self.tables.write();
        let Some(company) = tables.companies.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };

        // Apply to a copy so a failed assignment leaves the row untouched.
        let mut updated = company.clone();
        updated.apply(update)?;
        updated.updated_at = Utc::now();
        *company = updated.clone();
        Ok(Some(updated))
    }

    async fn soft_delete(&self, id: i32) -> Result<bool, DomainError> {
        let mut tables = self.tables.write();
        match tables.companies.iter_mut().find(|c| c.id == id) {
            Some(company) => {
                company.is_active = false;
                company.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_verified(&self, id: i32) -> Result<Option<Company>, DomainError> {
        let mut tables = self.tables.write();
        Ok(tables.companies.iter_mut().find(|c| c.id == id).map(|company| {
            company.is_verified = true;
            company.updated_at = Utc::now();
            company.clone()
        }))
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryStore {
    async fn insert(
        &self,
        company_id: i32,
        user_id: i32,
        role: EmployeeRole,
    ) -> Result<Employee, DomainError> {
        let mut tables = self.tables.write();
        let row = Employee {
            id: next_id(&mut tables.next_employee_id),
            company_id,
            user_id,
            role,
            is_active: true,
            created_at: Utc::now(),
            first_name: None,
            last_name: None,
            email: None,
            phone: None,
        };
        tables.employees.push(row.clone());
        Ok(row)
    }

    async fn list_active(&self, company_id: i32) -> Result<Vec<Employee>, DomainError> {
        let tables = self.tables.read();
        let mut employees: Vec<Employee> = tables
            .employees
            .iter()
            .filter(|e| e.company_id == company_id && e.is_active)
            // inner join: rows whose user is missing are dropped
            .filter_map(|e| {
                tables.users.iter().find(|u| u.id == e.user_id).map(|user| Employee {
                    first_name: Some(user.first_name.clone()),
                    last_name: Some(user.last_name.clone()),
                    email: Some(user.email.clone()),
                    phone: user.phone.clone(),
                    ..e.clone()
                })
            })
            .collect();
        employees.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(employees)
    }

    async fn deactivate(&self, company_id: i32, employee_id: i32) -> Result<bool, DomainError> {
        let mut tables = self.tables.write();
        match tables
            .employees
            .iter_mut()
            .find(|e| e.company_id == company_id && e.id == employee_id)
        {
            Some(employee) => {
                employee.is_active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_role(
        &self,
        company_id: i32,
        employee_id: i32,
        role: EmployeeRole,
    ) -> Result<Option<Employee>, DomainError> {
        let mut tables = self.tables.write();
        Ok(tables
            .employees
            .iter_mut()
            .find(|e| e.company_id == company_id && e.id == employee_id)
            .map(|employee| {
                employee.role = role;
                employee.clone()
            }))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        Ok(self.tables.read().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .tables
            .read()
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let mut tables = self.tables.write();
        if tables.users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(DomainError::EmailAlreadyExists(user.email.clone()));
        }
        let row = User {
            id: next_id(&mut tables.next_user_id),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone(),
            role: user.role,
            is_active: true,
            created_at: Utc::now(),
        };
        tables.users.push(row.clone());
        Ok(row)
    }

    async fn update_password(&self, id: i32, password_hash: &str) -> Result<bool, DomainError> {
        let mut tables = self.tables.write();
        match tables.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
