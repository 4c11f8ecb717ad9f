//! User domain entity and the authenticated principal

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::DomainError;
use crate::validation::error_with_message;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    CompanyAdmin,
    Customer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "super_admin",
            UserRole::CompanyAdmin => "company_admin",
            UserRole::Customer => "customer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "super_admin" => Some(UserRole::SuperAdmin),
            "company_admin" => Some(UserRole::CompanyAdmin),
            "customer" => Some(UserRole::Customer),
            _ => None,
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Customer
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.id,
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Row to insert; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
}

/// Self-service registration payload.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterInput {
    #[serde(default)]
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[serde(default)]
    #[validate(length(min = 2, message = "First name must be at least 2 characters"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(min = 2, message = "Last name must be at least 2 characters"))]
    pub last_name: String,

    pub phone: Option<String>,

    #[validate(custom(function = "validate_self_assignable_role"))]
    pub role: Option<UserRole>,
}

fn validate_self_assignable_role(role: &UserRole) -> Result<(), ValidationError> {
    match role {
        UserRole::SuperAdmin => Err(error_with_message(
            "role",
            "super_admin cannot be self-assigned",
        )),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginInput {
    #[serde(default)]
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Authenticated identity attached to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: i32,
    pub email: String,
    pub role: UserRole,
}

impl Principal {
    pub fn has_role(&self, roles: &[UserRole]) -> bool {
        roles.contains(&self.role)
    }

    pub fn require_role(&self, roles: &[UserRole]) -> Result<(), DomainError> {
        if self.has_role(roles) {
            Ok(())
        } else {
            Err(DomainError::Forbidden(format!(
                "role {} is not permitted for this operation",
                self.role.as_str()
            )))
        }
    }
}
