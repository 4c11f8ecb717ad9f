// ============================================================================
// Directory Infrastructure - Turkiye API Client
// File: crates/directory-infrastructure/src/address/turkiye_client.rs
// ============================================================================
//! `AddressLookup` over the public turkiyeapi.dev REST API.
//!
//! Every endpoint wraps its payload as `{ "data": ... }`.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

use directory_core::domain::{District, Neighborhood, Province};
use directory_core::error::DomainError;
use directory_core::providers::AddressLookup;
use directory_shared::config::AddressSettings;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Clone)]
pub struct TurkiyeApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl TurkiyeApiClient {
    pub fn new(settings: &AddressSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("directory-server/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// `Ok(None)` on 404; any other failure is `UpstreamUnavailable`.
    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, DomainError> {
        let url = self.endpoint(path);
        debug!("Address lookup: GET {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!("Address lookup request failed: {}", e);
            DomainError::UpstreamUnavailable(format!("request to {} failed: {}", path, e))
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            error!("Address lookup {} returned {}", path, status);
            return Err(DomainError::UpstreamUnavailable(format!(
                "{} returned {}",
                path, status
            )));
        }

        let body = response.json::<Envelope<T>>().await.map_err(|e| {
            error!("Failed to parse address lookup response: {}", e);
            DomainError::UpstreamUnavailable(format!("unreadable response from {}: {}", path, e))
        })?;

        Ok(Some(body.data))
    }

    /// List endpoints treat a 404 as an empty list.
    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, DomainError> {
        Ok(self.fetch(path).await?.unwrap_or_default())
    }
}

#[async_trait]
impl AddressLookup for TurkiyeApiClient {
    async fn list_provinces(&self) -> Result<Vec<Province>, DomainError> {
        self.fetch_list("provinces").await
    }

    async fn get_province(&self, id: i32) -> Result<Option<Province>, DomainError> {
        self.fetch(&format!("provinces/{}", id)).await
    }

    async fn list_districts(&self, province_id: i32) -> Result<Vec<District>, DomainError> {
        self.fetch_list(&format!("districts?provinceId={}", province_id))
            .await
    }

    async fn list_neighborhoods(
        &self,
        _province_id: i32,
        district_id: i32,
    ) -> Result<Vec<Neighborhood>, DomainError> {
        self.fetch_list(&format!("neighborhoods?districtId={}", district_id))
            .await
    }
}
