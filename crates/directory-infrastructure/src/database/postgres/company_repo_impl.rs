// ============================================================================
// Directory Infrastructure - PostgreSQL Company Repository
// File: crates/directory-infrastructure/src/database/postgres/company_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{error, info};

use directory_core::domain::{Company, CompanyFilter, NewCompany};
use directory_core::error::DomainError;
use directory_core::partial_update::{FieldValue, PartialUpdate};
use directory_core::repositories::CompanyRepository;

const COMPANY_COLUMNS: &str = r#"
    id, name, description, phone, email, website,
    address_line, province_id, province_name, district_id, district_name,
    neighborhood_id, neighborhood_name, postal_code, latitude, longitude,
    bank_name, bank_branch, iban, account_holder_name,
    commission_rate, payment_enabled, is_active, is_verified,
    created_by, created_at, updated_at
"#;

pub struct PgCompanyRepository {
    pool: PgPool,
}

impl PgCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct CompanyRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub address_line: Option<String>,
    pub province_id: Option<i32>,
    pub province_name: Option<String>,
    pub district_id: Option<i32>,
    pub district_name: Option<String>,
    pub neighborhood_id: Option<i32>,
    pub neighborhood_name: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub bank_name: Option<String>,
    pub bank_branch: Option<String>,
    pub iban: Option<String>,
    pub account_holder_name: Option<String>,
    pub commission_rate: f64,
    pub payment_enabled: bool,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Company {
            id: row.id,
            name: row.name,
            description: row.description,
            phone: row.phone,
            email: row.email,
            website: row.website,
            address_line: row.address_line,
            province_id: row.province_id,
            province_name: row.province_name,
            district_id: row.district_id,
            district_name: row.district_name,
            neighborhood_id: row.neighborhood_id,
            neighborhood_name: row.neighborhood_name,
            postal_code: row.postal_code,
            latitude: row.latitude,
            longitude: row.longitude,
            bank_name: row.bank_name,
            bank_branch: row.bank_branch,
            iban: row.iban,
            account_holder_name: row.account_holder_name,
            commission_rate: row.commission_rate,
            payment_enabled: row.payment_enabled,
            is_active: row.is_active,
            is_verified: row.is_verified,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Escapes `LIKE` wildcards so the search term matches literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// `SELECT ... WHERE 1=1 [AND ...] ORDER BY created_at DESC, id DESC`
fn list_query(filter: &CompanyFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!("SELECT {} FROM companies WHERE 1=1", COMPANY_COLUMNS));

    if let Some(is_active) = filter.is_active {
        query.push(" AND is_active = ").push_bind(is_active);
    }
    if let Some(is_verified) = filter.is_verified {
        query.push(" AND is_verified = ").push_bind(is_verified);
    }
    if let Some(term) = filter.search_term() {
        let pattern = like_pattern(term);
        query
            .push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR email ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    query.push(" ORDER BY created_at DESC, id DESC");
    query
}

/// `UPDATE companies SET <supplied columns>, updated_at = NOW() WHERE id = $n`
fn update_sql(update: &PartialUpdate) -> String {
    format!(
        "UPDATE companies SET {}, updated_at = NOW() WHERE id = ${} RETURNING {}",
        update.set_clause(1),
        update.len() + 1,
        COMPANY_COLUMNS
    )
}

#[async_trait]
impl CompanyRepository for PgCompanyRepository {
    async fn insert(&self, company: &NewCompany, created_by: i32) -> Result<Company, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO companies (
                name, description, phone, email, website,
                address_line, province_id, province_name, district_id, district_name,
                neighborhood_id, neighborhood_name, postal_code, latitude, longitude,
                bank_name, bank_branch, iban, account_holder_name,
                commission_rate, payment_enabled, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                    $16, $17, $18, $19, $20, $21, $22)
            RETURNING {}
            "#,
            COMPANY_COLUMNS
        );

        let row: CompanyRow = sqlx::query_as(&sql)
            .bind(&company.name)
            .bind(&company.description)
            .bind(&company.phone)
            .bind(&company.email)
            .bind(&company.website)
            .bind(&company.address_line)
            .bind(company.province_id)
            .bind(&company.province_name)
            .bind(company.district_id)
            .bind(&company.district_name)
            .bind(company.neighborhood_id)
            .bind(&company.neighborhood_name)
            .bind(&company.postal_code)
            .bind(company.latitude)
            .bind(company.longitude)
            .bind(&company.bank_name)
            .bind(&company.bank_branch)
            .bind(&company.iban)
            .bind(&company.account_holder_name)
            .bind(company.commission_rate.unwrap_or(0.0))
            .bind(company.payment_enabled.unwrap_or(false))
            .bind(created_by)
            .fetch_one(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error creating company: {}", e);
                match &e {
                    sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                        DomainError::InvalidInput(format!("unknown creator: {}", created_by))
                    }
                    _ => DomainError::DatabaseError(e.to_string()),
                }
            })?;

        info!("Company row inserted: {}", row.id);
        Ok(row.into())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Company>, DomainError> {
        let sql = format!("SELECT {} FROM companies WHERE id = $1", COMPANY_COLUMNS);
        let row: Option<CompanyRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error finding company by id: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(row.map(|r| r.into()))
    }

    async fn list(&self, filter: &CompanyFilter) -> Result<Vec<Company>, DomainError> {
        let rows: Vec<CompanyRow> = list_query(filter)
            .build_query_as::<CompanyRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error listing companies: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn update(&self, id: i32, update: &PartialUpdate) -> Result<Option<Company>, DomainError> {
        if update.is_empty() {
            return Err(DomainError::InternalError("empty company update".to_string()));
        }

        let sql = update_sql(update);
        let mut query = sqlx::query_as::<_, CompanyRow>(&sql);
        for assignment in update.assignments() {
            query = match &assignment.value {
                FieldValue::Text(value) => query.bind(value.clone()),
                FieldValue::Integer(value) => query.bind(*value),
                FieldValue::Float(value) => query.bind(*value),
                FieldValue::Flag(value) => query.bind(*value),
            };
        }

        let row: Option<CompanyRow> = query
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error updating company {}: {}", id, e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(row.map(|r| r.into()))
    }

    async fn soft_delete(&self, id: i32) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE companies
            SET is_active = false, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error deactivating company {}: {}", id, e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn mark_verified(&self, id: i32) -> Result<Option<Company>, DomainError> {
        let sql = format!(
            "UPDATE companies SET is_verified = true, updated_at = NOW() WHERE id = $1 RETURNING {}",
            COMPANY_COLUMNS
        );
        let row: Option<CompanyRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error verifying company {}: {}", id, e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(row.map(|r| r.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squash(sql: &str) -> String {
        sql.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_list_query_without_filters() {
        let sql = squash(list_query(&CompanyFilter::default()).sql());
        assert!(sql.ends_with("FROM companies WHERE 1=1 ORDER BY created_at DESC, id DESC"));
    }

    #[test]
    fn test_list_query_composes_filters_with_and() {
        let filter = CompanyFilter {
            is_active: Some(true),
            is_verified: Some(false),
            search: Some("  salon ".to_string()),
        };
        let sql = squash(list_query(&filter).sql());
        assert!(sql.contains(
            "WHERE 1=1 AND is_active = $1 AND is_verified = $2 AND (name ILIKE $3 OR email ILIKE $4)"
        ));
    }

    #[test]
    fn test_empty_search_adds_no_clause() {
        let filter = CompanyFilter {
            search: Some(String::new()),
            ..CompanyFilter::default()
        };
        assert!(!list_query(&filter).sql().contains("ILIKE"));
    }

    #[test]
    fn test_search_pattern_keeps_whitespace() {
        assert_eq!(like_pattern(" Co"), "% Co%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn test_update_sql_lists_only_supplied_columns() {
        let mut update = PartialUpdate::new();
        update
            .set("name", FieldValue::Text(Some("Acme".into())))
            .set("latitude", FieldValue::Float(None));

        let sql = squash(&update_sql(&update));
        assert!(sql.starts_with(
            "UPDATE companies SET name = $1, latitude = $2, updated_at = NOW() WHERE id = $3 RETURNING"
        ));
        assert!(!sql.contains("phone ="));
    }
}
