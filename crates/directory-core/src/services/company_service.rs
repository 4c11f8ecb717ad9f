// ============================================================================
// Directory Core - Company Directory Service
// File: crates/directory-core/src/services/company_service.rs
// ============================================================================
//! Company lifecycle: create, partial update, read, list, soft-delete, verify.
//!
//! Authorization happens at the API boundary; this service trusts its caller.

use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use crate::domain::{Company, CompanyFilter, CompanyPatch, NewCompany};
use crate::error::DomainError;
use crate::repositories::CompanyRepository;

pub struct CompanyDirectoryService {
    companies: Arc<dyn CompanyRepository>,
}

impl CompanyDirectoryService {
    pub fn new(companies: Arc<dyn CompanyRepository>) -> Self {
        Self { companies }
    }

    /// Validates and inserts a company owned by `created_by`.
    ///
    /// Every violated field is reported at once.
    pub async fn create(&self, input: NewCompany, created_by: i32) -> Result<Company, DomainError> {
        let input = input.normalized();
        input.validate().map_err(|e| {
            warn!("Company create rejected: {}", e);
            DomainError::from(e)
        })?;

        let company = self.companies.insert(&input, created_by).await?;
        info!(company_id = company.id, created_by, "Company created");
        Ok(company)
    }

    /// Writes only the supplied fields and returns the full updated row.
    pub async fn update(&self, id: i32, patch: CompanyPatch) -> Result<Company, DomainError> {
        // 1. Validate the supplied fields
        let patch = patch.normalized();
        patch.validate().map_err(|e| {
            warn!(company_id = id, "Company update rejected: {}", e);
            DomainError::from(e)
        })?;

        // 2. Project onto column assignments
        let update = patch.into_update();
        if update.is_empty() {
            warn!(company_id = id, "Company update rejected: no fields supplied");
            return Err(DomainError::validation("body", "No fields to update"));
        }

        // 3. Single UPDATE ... RETURNING
        let company = self
            .companies
            .update(id, &update)
            .await?
            .ok_or(DomainError::CompanyNotFound(id))?;

        info!(company_id = id, columns = ?update.columns(), "Company updated");
        Ok(company)
    }

    pub async fn get(&self, id: i32) -> Result<Company, DomainError> {
        self.companies
            .find_by_id(id)
            .await?
            .ok_or(DomainError::CompanyNotFound(id))
    }

    /// Newest first.
    pub async fn list(&self, filter: &CompanyFilter) -> Result<Vec<Company>, DomainError> {
        self.companies.list(filter).await
    }

    /// Marks the company inactive. Returns `false` when no company has `id`.
    pub async fn soft_delete(&self, id: i32) -> Result<bool, DomainError> {
        let deleted = self.companies.soft_delete(id).await?;
        if deleted {
            info!(company_id = id, "Company deactivated");
        }
        Ok(deleted)
    }

    /// One-way; verifying twice is harmless.
    pub async fn verify(&self, id: i32) -> Result<Company, DomainError> {
        let company = self
            .companies
            .mark_verified(id)
            .await?
            .ok_or(DomainError::CompanyNotFound(id))?;

        info!(company_id = id, "Company verified");
        Ok(company)
    }
}
