//! Domain services (business logic)

pub mod account_service;
pub mod company_service;
pub mod workforce_service;

pub use account_service::{AccountService, AuthSession};
pub use company_service::CompanyDirectoryService;
pub use workforce_service::WorkforceService;
