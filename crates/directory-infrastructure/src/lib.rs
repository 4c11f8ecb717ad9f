//! # Directory Infrastructure
//! 
//! Postgres repositories and the HTTP address lookup (adapters).

pub mod address;
pub mod database;

pub use address::TurkiyeApiClient;
pub use database::{
    create_pool, run_migrations, PgCompanyRepository, PgEmployeeRepository, PgUserRepository,
};
