//! # Directory Core - Domain Module
//!
//! Domain entities for the company directory.

pub mod address;
pub mod company;
pub mod employee;
pub mod user;

// Re-export all entities and enums
pub use address::{District, Neighborhood, Province};
pub use company::{Company, CompanyFilter, CompanyPatch, NewCompany};
pub use employee::{Employee, EmployeeRole};
pub use user::{LoginInput, NewUser, Principal, RegisterInput, User, UserRole};
