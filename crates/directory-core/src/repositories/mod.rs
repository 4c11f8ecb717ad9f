//! Repository traits (ports) and the in-memory store

pub mod company_repository;
pub mod employee_repository;
pub mod user_repository;
pub mod in_memory;

pub use company_repository::CompanyRepository;
pub use employee_repository::EmployeeRepository;
pub use user_repository::UserRepository;
pub use in_memory::InMemoryStore;

#[cfg(test)]
pub use company_repository::MockCompanyRepository;
#[cfg(test)]
pub use employee_repository::MockEmployeeRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
