// ============================================================================
// Directory Core - Address Lookup Port
// File: crates/directory-core/src/providers/address_lookup.rs
// ============================================================================
//! Read-only access to Turkish provinces, districts and neighborhoods.

use async_trait::async_trait;
use tracing::warn;

use crate::domain::{District, Neighborhood, Province};
use crate::error::DomainError;

/// Geographic reference data provider.
///
/// Operations fail with `UpstreamUnavailable` when the provider cannot be
/// reached; only the lookup by name degrades to `None`.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    async fn list_provinces(&self) -> Result<Vec<Province>, DomainError>;

    /// `Ok(None)` when no province has `id`.
    async fn get_province(&self, id: i32) -> Result<Option<Province>, DomainError>;

    async fn list_districts(&self, province_id: i32) -> Result<Vec<District>, DomainError>;

    /// Neighborhoods are keyed by district; the province id scopes the request.
    async fn list_neighborhoods(
        &self,
        province_id: i32,
        district_id: i32,
    ) -> Result<Vec<Neighborhood>, DomainError>;

    /// Case-insensitive exact match on the province name.
    async fn find_province_by_name(&self, name: &str) -> Option<Province> {
        match self.list_provinces().await {
            Ok(provinces) => {
                let needle = name.trim().to_lowercase();
                provinces
                    .into_iter()
                    .find(|p| p.name.to_lowercase() == needle)
            }
            Err(e) => {
                warn!("Province lookup by name failed: {}", e);
                None
            }
        }
    }
}
