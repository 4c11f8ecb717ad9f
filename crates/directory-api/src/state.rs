//! Shared handler state

use std::sync::Arc;

use directory_core::providers::{AddressLookup, AuthProvider};
use directory_core::repositories::{CompanyRepository, EmployeeRepository, UserRepository};
use directory_core::services::{AccountService, CompanyDirectoryService, WorkforceService};

#[derive(Clone)]
pub struct AppState {
    pub companies: Arc<CompanyDirectoryService>,
    pub workforce: Arc<WorkforceService>,
    pub accounts: Arc<AccountService>,
    pub address: Arc<dyn AddressLookup>,
    pub auth: Arc<dyn AuthProvider>,
}

impl AppState {
    pub fn new(
        companies: Arc<dyn CompanyRepository>,
        employees: Arc<dyn EmployeeRepository>,
        users: Arc<dyn UserRepository>,
        address: Arc<dyn AddressLookup>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        Self {
            companies: Arc::new(CompanyDirectoryService::new(companies)),
            workforce: Arc::new(WorkforceService::new(employees)),
            accounts: Arc::new(AccountService::new(users, auth.clone())),
            address,
            auth,
        }
    }
}
