//! PostgreSQL repository implementations

pub mod company_repo_impl;
pub mod employee_repo_impl;
pub mod user_repo_impl;

pub use company_repo_impl::PgCompanyRepository;
pub use employee_repo_impl::PgEmployeeRepository;
pub use user_repo_impl::PgUserRepository;
