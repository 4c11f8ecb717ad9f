//! HTTP handlers

pub mod address;
pub mod auth;
pub mod companies;
pub mod employees;
pub mod health;
