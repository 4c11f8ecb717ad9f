// ============================================================================
// Directory Core - Company Entity
// File: crates/directory-core/src/domain/company.rs
// Description: Business listing with address snapshot and payout details
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::error::DomainError;
use crate::partial_update::{deserialize_some, FieldValue, PartialUpdate};
use crate::validation::{
    normalize_iban, validate_iban, Checks, COMMISSION_MESSAGE, LATITUDE_MESSAGE,
    LONGITUDE_MESSAGE, NAME_MESSAGE,
};

/// Company entity as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,

    // Address snapshot
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

    // Bank
    pub bank_name: Option<String>,
    pub bank_branch: Option<String>,
    pub iban: Option<String>,
    pub account_holder_name: Option<String>,

    // Payment
    pub commission_rate: f64,
    pub payment_enabled: bool,

    // Status
    pub is_active: bool,
    pub is_verified: bool,

    // Audit fields
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    /// Applies column assignments produced by [`CompanyPatch::into_update`].
    pub fn apply(&mut self, update: &PartialUpdate) -> Result<(), DomainError> {
        for assignment in update.assignments() {
            match (assignment.column, &assignment.value) {
                ("name", FieldValue::Text(Some(v))) => self.name = v.clone(),
                ("description", FieldValue::Text(v)) => self.description = v.clone(),
                ("phone", FieldValue::Text(v)) => self.phone = v.clone(),
                ("email", FieldValue::Text(v)) => self.email = v.clone(),
                ("website", FieldValue::Text(v)) => self.website = v.clone(),
                ("address_line", FieldValue::Text(v)) => self.address_line = v.clone(),
                ("province_id", FieldValue::Integer(v)) => self.province_id = *v,
                ("province_name", FieldValue::Text(v)) => self.province_name = v.clone(),
                ("district_id", FieldValue::Integer(v)) => self.district_id = *v,
                ("district_name", FieldValue::Text(v)) => self.district_name = v.clone(),
                ("neighborhood_id", FieldValue::Integer(v)) => self.neighborhood_id = *v,
                ("neighborhood_name", FieldValue::Text(v)) => self.neighborhood_name = v.clone(),
                ("postal_code", FieldValue::Text(v)) => self.postal_code = v.clone(),
                ("latitude", FieldValue::Float(v)) => self.latitude = *v,
                ("longitude", FieldValue::Float(v)) => self.longitude = *v,
                ("bank_name", FieldValue::Text(v)) => self.bank_name = v.clone(),
                ("bank_branch", FieldValue::Text(v)) => self.bank_branch = v.clone(),
                ("iban", FieldValue::Text(v)) => self.iban = v.clone(),
                ("account_holder_name", FieldValue::Text(v)) => self.account_holder_name = v.clone(),
                ("commission_rate", FieldValue::Float(Some(v))) => self.commission_rate = *v,
                ("payment_enabled", FieldValue::Flag(v)) => self.payment_enabled = *v,
                (column, value) => {
                    return Err(DomainError::InternalError(format!(
                        "cannot assign {:?} to company column {}",
                        value, column
                    )))
                }
            }
        }
        Ok(())
    }
}

/// Input for creating a company.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewCompany {
    #[serde(default)]
    #[validate(length(min = 2, message = "Company name must be at least 2 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub phone: Option<String>,

    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,

    #[validate(url(message = "Enter a valid website URL"))]
    pub website: Option<String>,

    pub address_line: Option<String>,
    pub province_id: Option<i32>,
    pub province_name: Option<String>,
    pub district_id: Option<i32>,
    pub district_name: Option<String>,
    pub neighborhood_id: Option<i32>,
    pub neighborhood_name: Option<String>,
    pub postal_code: Option<String>,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: Option<f64>,

    pub bank_name: Option<String>,
    pub bank_branch: Option<String>,

    #[validate(custom(function = "validate_iban"))]
    pub iban: Option<String>,
    pub account_holder_name: Option<String>,

    #[validate(range(min = 0.0, max = 100.0, message = "Commission rate must be between 0 and 100"))]
    pub commission_rate: Option<f64>,
    pub payment_enabled: Option<bool>,
}

impl NewCompany {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Normalizes the IBAN; an IBAN that normalizes to nothing is dropped.
    /// Every other field is stored as supplied.
    pub fn normalized(mut self) -> Self {
        self.iban = self.iban.map(|raw| normalize_iban(&raw)).filter(|iban| !iban.is_empty());
        self
    }
}

/// Partial update input.
///
/// Every field distinguishes "absent" (`None`, left untouched) from "present"
/// (`Some(..)`); `Some(None)` is an explicit JSON `null` and clears a nullable
/// column.
#[derive(Debug, Clone, Default, Deserialize)]
#[allow(clippy::option_option)]
pub struct CompanyPatch {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub website: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub address_line: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub province_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub province_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub district_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub district_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub neighborhood_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub neighborhood_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub postal_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub latitude: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub longitude: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub bank_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub bank_branch: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub iban: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub account_holder_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub commission_rate: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub payment_enabled: Option<Option<bool>>,
}

impl CompanyPatch {
    pub fn normalized(mut self) -> Self {
        if let Some(iban) = self.iban.take() {
            self.iban = Some(iban.map(|raw| normalize_iban(&raw)).filter(|v| !v.is_empty()));
        }
        self
    }

    /// Projects the supplied fields onto column assignments, in declaration order.
    pub fn into_update(self) -> PartialUpdate {
        let mut update = PartialUpdate::new();
        update
            .set_if_present("name", self.name, FieldValue::Text)
            .set_if_present("description", self.description, FieldValue::Text)
            .set_if_present("phone", self.phone, FieldValue::Text)
            .set_if_present("email", self.email, FieldValue::Text)
            .set_if_present("website", self.website, FieldValue::Text)
            .set_if_present("address_line", self.address_line, FieldValue::Text)
            .set_if_present("province_id", self.province_id, FieldValue::Integer)
            .set_if_present("province_name", self.province_name, FieldValue::Text)
            .set_if_present("district_id", self.district_id, FieldValue::Integer)
            .set_if_present("district_name", self.district_name, FieldValue::Text)
            .set_if_present("neighborhood_id", self.neighborhood_id, FieldValue::Integer)
            .set_if_present("neighborhood_name", self.neighborhood_name, FieldValue::Text)
            .set_if_present("postal_code", self.postal_code, FieldValue::Text)
            .set_if_present("latitude", self.latitude, FieldValue::Float)
            .set_if_present("longitude", self.longitude, FieldValue::Float)
            .set_if_present("bank_name", self.bank_name, FieldValue::Text)
            .set_if_present("bank_branch", self.bank_branch, FieldValue::Text)
            .set_if_present("iban", self.iban, FieldValue::Text)
            .set_if_present("account_holder_name", self.account_holder_name, FieldValue::Text)
            .set_if_present("commission_rate", self.commission_rate, FieldValue::Float);

        if let Some(payment_enabled) = self.payment_enabled.flatten() {
            update.set("payment_enabled", FieldValue::Flag(payment_enabled));
        }
        update
    }
}

impl Validate for CompanyPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = Checks::new();

        match &self.name {
            Some(Some(name)) => checks.min_chars("name", name, 2, NAME_MESSAGE),
            Some(None) => checks.fail("name", "required", "Company name cannot be cleared"),
            None => {}
        }
        if let Some(Some(email)) = &self.email {
            checks.email("email", email);
        }
        if let Some(Some(website)) = &self.website {
            checks.url("website", website);
        }
        if let Some(Some(latitude)) = self.latitude {
            checks.range("latitude", latitude, -90.0, 90.0, LATITUDE_MESSAGE);
        }
        if let Some(Some(longitude)) = self.longitude {
            checks.range("longitude", longitude, -180.0, 180.0, LONGITUDE_MESSAGE);
        }
        if let Some(Some(iban)) = &self.iban {
            checks.iban("iban", iban);
        }
        match self.commission_rate {
            Some(Some(rate)) => checks.range("commission_rate", rate, 0.0, 100.0, COMMISSION_MESSAGE),
            Some(None) => checks.fail("commission_rate", "required", "Commission rate cannot be cleared"),
            None => {}
        }
        if let Some(None) = self.payment_enabled {
            checks.fail("payment_enabled", "required", "Payment flag cannot be cleared");
        }

        checks.finish()
    }
}

/// Filters for listing companies; every present filter must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyFilter {
    pub is_active: Option<bool>,
    pub is_verified: Option<bool>,
    pub search: Option<String>,
}

impl CompanyFilter {
    /// Search term as supplied; only an empty string is ignored.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    pub fn matches(&self, company: &Company) -> bool {
        if self.is_active.is_some_and(|active| company.is_active != active) {
            return false;
        }
        if self.is_verified.is_some_and(|verified| company.is_verified != verified) {
            return false;
        }
        match self.search_term() {
            Some(term) => {
                let needle = term.to_lowercase();
                company.name.to_lowercase().contains(&needle)
                    || company
                        .email
                        .as_deref()
                        .is_some_and(|email| email.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }
}
