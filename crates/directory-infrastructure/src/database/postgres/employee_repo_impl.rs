// ============================================================================
// Directory Infrastructure - PostgreSQL Employee Repository
// File: crates/directory-infrastructure/src/database/postgres/employee_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};

use directory_core::domain::{Employee, EmployeeRole};
use directory_core::error::DomainError;
use directory_core::repositories::EmployeeRepository;

pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping; identity columns exist only on the joined read
#[derive(Debug, FromRow)]
struct EmployeeRow {
    pub id: i32,
    pub company_id: i32,
    pub user_id: i32,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[sqlx(default)]
    pub first_name: Option<String>,
    #[sqlx(default)]
    pub last_name: Option<String>,
    #[sqlx(default)]
    pub email: Option<String>,
    #[sqlx(default)]
    pub phone: Option<String>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id,
            company_id: row.company_id,
            user_id: row.user_id,
            role: EmployeeRole::from_str(&row.role).unwrap_or_default(),
            is_active: row.is_active,
            created_at: row.created_at,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
        }
    }
}

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    async fn insert(
        &self,
        company_id: i32,
        user_id: i32,
        role: EmployeeRole,
    ) -> Result<Employee, DomainError> {
        let row: EmployeeRow = sqlx::query_as(
            r#"
            INSERT INTO company_users (company_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING id, company_id, user_id, role, is_active, created_at
            "#,
        )
        .bind(company_id)
        .bind(user_id)
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error adding employee: {}", e);
            match &e {
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => DomainError::InvalidInput(
                    format!("company {} or user {} does not exist", company_id, user_id),
                ),
                _ => DomainError::DatabaseError(e.to_string()),
            }
        })?;

        info!("Employee row inserted: {}", row.id);
        Ok(row.into())
    }

    async fn list_active(&self, company_id: i32) -> Result<Vec<Employee>, DomainError> {
        let rows: Vec<EmployeeRow> = sqlx::query_as(
            r#"
            SELECT
                cu.id, cu.company_id, cu.user_id, cu.role, cu.is_active, cu.created_at,
                u.first_name, u.last_name, u.email, u.phone
            FROM company_users cu
            JOIN users u ON u.id = cu.user_id
            WHERE cu.company_id = $1 AND cu.is_active = true
            ORDER BY cu.created_at ASC, cu.id ASC
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing employees of company {}: {}", company_id, e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn deactivate(&self, company_id: i32, employee_id: i32) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE company_users
            SET is_active = false
            WHERE id = $1 AND company_id = $2
            "#,
        )
        .bind(employee_id)
        .bind(company_id)
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error removing employee {}: {}", employee_id, e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_role(
        &self,
        company_id: i32,
        employee_id: i32,
        role: EmployeeRole,
    ) -> Result<Option<Employee>, DomainError> {
        let row: Option<EmployeeRow> = sqlx::query_as(
            r#"
            UPDATE company_users
            SET role = $1
            WHERE id = $2 AND company_id = $3
            RETURNING id, company_id, user_id, role, is_active, created_at
            "#,
        )
        .bind(role.as_str())
        .bind(employee_id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating employee {} role: {}", employee_id, e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }
}
