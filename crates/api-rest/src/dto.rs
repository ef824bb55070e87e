//! Request and response bodies for the drug application records API.
//!
//! Wire names are camelCase. Required fields are parsed into `NonEmptyText`
//! here, at the boundary, and failures are collected into a field-to-message
//! map so the caller sees every problem at once. Nothing blank reaches the
//! record core.

use std::collections::{BTreeMap, BTreeSet};

use fda_core::{DrugApplicationRecord, RecordPage};
use fda_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

fn default_limit() -> u32 {
    10
}

/// Query parameters of the search endpoint, as received.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// FDA manufacturer name (required).
    pub manufacturer_name: Option<String>,
    /// FDA brand name (optional).
    pub brand_name: Option<String>,
    /// Number of results to skip.
    #[serde(default)]
    pub skip: u32,
    /// Maximum number of results to return.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// Validated search filter handed to the service.
#[derive(Debug, Clone)]
pub struct SearchFilter {
    pub manufacturer_name: NonEmptyText,
    pub brand_name: Option<String>,
    pub skip: u32,
    pub limit: u32,
}

impl SearchParams {
    /// Validates the raw parameters into a [`SearchFilter`].
    ///
    /// A blank brand name is treated as absent. Failures are returned as a
    /// field-to-message map.
    pub fn validate(self) -> Result<SearchFilter, BTreeMap<String, String>> {
        let mut errors = BTreeMap::new();

        let manufacturer_name = self
            .manufacturer_name
            .as_deref()
            .and_then(|m| NonEmptyText::new(m).ok());
        if manufacturer_name.is_none() {
            errors.insert(
                "manufacturerName".to_owned(),
                "Manufacturer name is required".to_owned(),
            );
        }

        if self.limit < 1 {
            errors.insert("limit".to_owned(), "Limit must be at least 1".to_owned());
        }

        let brand_name = self.brand_name.filter(|b| !b.trim().is_empty());

        match manufacturer_name {
            Some(manufacturer_name) if errors.is_empty() => Ok(SearchFilter {
                manufacturer_name,
                brand_name,
                skip: self.skip,
                limit: self.limit,
            }),
            _ => Err(errors),
        }
    }
}

/// Query parameters of the listing endpoint.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Page number (zero-based).
    #[serde(default)]
    pub page: u32,
    /// Page size.
    #[serde(default = "default_limit")]
    pub size: u32,
}

impl ListParams {
    pub fn validate(self) -> Result<(u32, u32), BTreeMap<String, String>> {
        if self.size < 1 {
            let mut errors = BTreeMap::new();
            errors.insert("size".to_owned(), "Size must be at least 1".to_owned());
            return Err(errors);
        }

        Ok((self.page, self.size))
    }
}

/// Body for storing specific drug application record details.
///
/// Fields default to empty when missing so that every shortfall surfaces
/// through [`validate`](Self::validate) rather than a deserialization error.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreDrugApplicationRecordRequest {
    #[serde(default)]
    pub application_number: String,
    #[serde(default)]
    pub manufacturer_name: String,
    #[serde(default)]
    pub substance_name: String,
    #[serde(default)]
    pub product_numbers: BTreeSet<String>,
}

/// Validated store request.
#[derive(Debug, Clone)]
pub struct ValidStoreRequest {
    pub application_number: NonEmptyText,
    pub manufacturer_name: NonEmptyText,
    pub substance_name: NonEmptyText,
    pub product_numbers: BTreeSet<String>,
}

impl StoreDrugApplicationRecordRequest {
    /// Validates the body into a [`ValidStoreRequest`], collecting every
    /// field failure into one map.
    pub fn validate(self) -> Result<ValidStoreRequest, BTreeMap<String, String>> {
        let mut errors = BTreeMap::new();

        let application_number = NonEmptyText::new(&self.application_number).ok();
        if application_number.is_none() {
            errors.insert(
                "applicationNumber".to_owned(),
                "Application number is required".to_owned(),
            );
        }

        let manufacturer_name = NonEmptyText::new(&self.manufacturer_name).ok();
        if manufacturer_name.is_none() {
            errors.insert(
                "manufacturerName".to_owned(),
                "Manufacturer name is required".to_owned(),
            );
        }

        let substance_name = NonEmptyText::new(&self.substance_name).ok();
        if substance_name.is_none() {
            errors.insert(
                "substanceName".to_owned(),
                "Substance name is required".to_owned(),
            );
        }

        if self.product_numbers.is_empty() {
            errors.insert(
                "productNumbers".to_owned(),
                "At least one product number is required".to_owned(),
            );
        } else if self.product_numbers.iter().any(|p| p.trim().is_empty()) {
            errors.insert(
                "productNumbers".to_owned(),
                "Product numbers must not be blank".to_owned(),
            );
        }

        match (application_number, manufacturer_name, substance_name) {
            (Some(application_number), Some(manufacturer_name), Some(substance_name))
                if errors.is_empty() =>
            {
                Ok(ValidStoreRequest {
                    application_number,
                    manufacturer_name,
                    substance_name,
                    product_numbers: self.product_numbers,
                })
            }
            _ => Err(errors),
        }
    }
}

/// A stored drug application record, as returned to callers.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrugApplicationRecordResponse {
    pub application_number: String,
    pub manufacturer_name: String,
    pub substance_name: String,
    pub product_numbers: BTreeSet<String>,
}

impl From<DrugApplicationRecord> for DrugApplicationRecordResponse {
    fn from(record: DrugApplicationRecord) -> Self {
        Self {
            application_number: record.application_number,
            manufacturer_name: record.manufacturer_name,
            substance_name: record.substance_name,
            product_numbers: record.product_numbers,
        }
    }
}

/// Paginated listing envelope.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub content: Vec<DrugApplicationRecordResponse>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl From<RecordPage> for PageResponse {
    fn from(page: RecordPage) -> Self {
        Self {
            content: page.content.into_iter().map(Into::into).collect(),
            page: page.page_number,
            size: page.page_size,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
        }
    }
}
