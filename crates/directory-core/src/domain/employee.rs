// ============================================================================
// Directory Core - Employee Entity
// File: crates/directory-core/src/domain/employee.rs
// Description: Company-User relationship with roles
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a user inside one company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeRole {
    Owner,
    Manager,
    Staff,
}

impl EmployeeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeRole::Owner => "owner",
            EmployeeRole::Manager => "manager",
            EmployeeRole::Staff => "staff",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "owner" => Some(EmployeeRole::Owner),
            "manager" => Some(EmployeeRole::Manager),
            "staff" => Some(EmployeeRole::Staff),
            _ => None,
        }
    }
}

impl Default for EmployeeRole {
    fn default() -> Self {
        EmployeeRole::Staff
    }
}

/// Employee entity (Company-User relationship)
///
/// The identity fields are filled only when the row is read joined with its
/// user; rows returned from writes leave them empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i32,
    pub company_id: i32,
    pub user_id: i32,
    pub role: EmployeeRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_and_default() {
        for role in [EmployeeRole::Owner, EmployeeRole::Manager, EmployeeRole::Staff] {
            assert_eq!(EmployeeRole::from_str(role.as_str()), Some(role));
        }
        assert_eq!(EmployeeRole::from_str("admin"), None);
        assert_eq!(EmployeeRole::default(), EmployeeRole::Staff);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&EmployeeRole::Manager).unwrap();
        assert_eq!(json, "\"manager\"");
        assert!(serde_json::from_str::<EmployeeRole>("\"director\"").is_err());
    }

    #[test]
    fn test_identity_fields_skipped_when_absent() {
        let employee = Employee {
            id: 1,
            company_id: 5,
            user_id: 7,
            role: EmployeeRole::Staff,
            is_active: true,
            created_at: Utc::now(),
            first_name: None,
            last_name: None,
            email: None,
            phone: None,
        };

        let value = serde_json::to_value(&employee).unwrap();
        assert!(value.get("first_name").is_none());
        assert_eq!(value["role"], "staff");
    }
}
