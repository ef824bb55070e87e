//! Drug application record management.
//!
//! This module owns the reconciliation of incoming record details against
//! stored state:
//!
//! - a record is created on the first store request for an application number
//! - later store requests for the same number overwrite the manufacturer and
//!   substance names and union the product-number sets
//!
//! Searches are delegated to the OpenFDA client and relayed unmodified.
//!
//! The reconciliation is a plain read-then-write with no version check, so
//! concurrent upserts of the same application number race and the last
//! writer's merge wins.

use std::collections::BTreeSet;
use std::sync::Arc;

use openfda::client::FdaClientResult;
use openfda::{FdaClient, FdaResponse};

use crate::error::RecordResult;
use crate::record::{DrugApplicationRecord, RecordPage};
use crate::store::RecordStore;

/// Service for managing drug application records.
///
/// Collaborators are passed in at construction: the record store behind the
/// [`RecordStore`] capability and the OpenFDA client for searches.
#[derive(Clone)]
pub struct DrugApplicationService {
    store: Arc<dyn RecordStore>,
    fda_client: FdaClient,
}

impl DrugApplicationService {
    /// Creates a new service over the given collaborators.
    pub fn new(store: Arc<dyn RecordStore>, fda_client: FdaClient) -> Self {
        Self { store, fda_client }
    }

    /// Searches for drug applications in the OpenFDA API.
    ///
    /// Pure delegation; client failures propagate unchanged so the boundary
    /// can classify them.
    pub async fn search(
        &self,
        manufacturer_name: &str,
        brand_name: Option<&str>,
        skip: u32,
        limit: u32,
    ) -> FdaClientResult<FdaResponse> {
        self.fda_client
            .search(manufacturer_name, brand_name, skip, limit)
            .await
    }

    /// Saves a drug application record, reconciling with any stored state.
    ///
    /// When no record exists for the application number, one is created with
    /// the given fields verbatim. When one exists, the manufacturer and
    /// substance names are overwritten (last write wins) and the stored
    /// product numbers are unioned with the given set.
    ///
    /// Performs exactly one store read and one store write.
    ///
    /// # Errors
    ///
    /// Returns `RecordError` if the store read or write fails.
    pub async fn save_record(
        &self,
        application_number: &str,
        manufacturer_name: &str,
        substance_name: &str,
        product_numbers: BTreeSet<String>,
    ) -> RecordResult<DrugApplicationRecord> {
        tracing::info!("Saving drug application record: {}", application_number);

        match self.store.find_by_id(application_number).await? {
            Some(mut existing) => {
                tracing::info!(
                    "Updating existing drug application record: {}",
                    application_number
                );

                existing.manufacturer_name = manufacturer_name.to_owned();
                existing.substance_name = substance_name.to_owned();
                existing.product_numbers.extend(product_numbers);

                self.store.save(&existing).await
            }
            None => {
                tracing::info!("Creating new drug application record: {}", application_number);

                let record = DrugApplicationRecord {
                    application_number: application_number.to_owned(),
                    manufacturer_name: manufacturer_name.to_owned(),
                    substance_name: substance_name.to_owned(),
                    product_numbers,
                };

                self.store.save(&record).await
            }
        }
    }

    /// Returns one page of stored records.
    pub async fn all_records(&self, page_number: u32, page_size: u32) -> RecordResult<RecordPage> {
        tracing::info!(
            "Getting all drug application records, page: {}, size: {}",
            page_number,
            page_size
        );

        self.store.find_all(page_number, page_size).await
    }

    /// Looks up a record by its application number.
    ///
    /// An unknown number is an absent result, not an error.
    pub async fn record_by_id(
        &self,
        application_number: &str,
    ) -> RecordResult<Option<DrugApplicationRecord>> {
        tracing::info!(
            "Getting drug application record by ID: {}",
            application_number
        );

        self.store.find_by_id(application_number).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteRecordStore;
    use std::time::Duration;
    use tempfile::TempDir;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn offline_client() -> FdaClient {
        // Points nowhere; upsert paths never touch the network.
        FdaClient::new(
            "http://127.0.0.1:1",
            Duration::from_millis(1000),
            Duration::from_millis(1000),
        )
        .expect("client should build")
    }

    async fn test_service(temp_dir: &TempDir, fda_client: FdaClient) -> DrugApplicationService {
        let store = SqliteRecordStore::from_path(temp_dir.path().join("records.db"))
            .await
            .expect("store should initialise");

        DrugApplicationService::new(Arc::new(store), fda_client)
    }

    fn numbers(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    #[tokio::test]
    async fn test_save_record_creates_new_record() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = test_service(&temp_dir, offline_client()).await;

        let saved = service
            .save_record("ANDA076805", "TARO", "LORATADINE", numbers(&["001", "002"]))
            .await
            .expect("save should succeed");

        assert_eq!(saved.application_number, "ANDA076805");
        assert_eq!(saved.manufacturer_name, "TARO");
        assert_eq!(saved.substance_name, "LORATADINE");
        assert_eq!(saved.product_numbers, numbers(&["001", "002"]));
    }

    #[tokio::test]
    async fn test_save_record_overwrites_names_and_unions_product_numbers() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = test_service(&temp_dir, offline_client()).await;

        service
            .save_record("ANDA076805", "TARO", "LORATADINE", numbers(&["001"]))
            .await
            .expect("first save should succeed");
        let merged = service
            .save_record("ANDA076805", "TARO2", "LORATADINE2", numbers(&["002"]))
            .await
            .expect("second save should succeed");

        assert_eq!(merged.manufacturer_name, "TARO2");
        assert_eq!(merged.substance_name, "LORATADINE2");
        assert_eq!(merged.product_numbers, numbers(&["001", "002"]));

        let found = service
            .record_by_id("ANDA076805")
            .await
            .expect("lookup should succeed")
            .expect("record should exist");
        assert_eq!(found, merged);
    }

    #[tokio::test]
    async fn test_resaving_subset_does_not_shrink_or_duplicate() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = test_service(&temp_dir, offline_client()).await;

        service
            .save_record("ANDA076805", "TARO", "LORATADINE", numbers(&["001", "002"]))
            .await
            .expect("first save should succeed");
        let merged = service
            .save_record("ANDA076805", "TARO", "LORATADINE", numbers(&["002"]))
            .await
            .expect("second save should succeed");

        assert_eq!(merged.product_numbers, numbers(&["001", "002"]));
    }

    #[tokio::test]
    async fn test_record_by_id_returns_none_for_unknown_number() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = test_service(&temp_dir, offline_client()).await;

        let found = service
            .record_by_id("NDA000000")
            .await
            .expect("lookup should succeed");

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_all_records_pages_stored_records() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = test_service(&temp_dir, offline_client()).await;

        service
            .save_record("ANDA076805", "TARO", "LORATADINE", numbers(&["001"]))
            .await
            .expect("save should succeed");
        service
            .save_record("NDA020641", "PFIZER", "CELECOXIB", numbers(&["001"]))
            .await
            .expect("save should succeed");

        let page = service
            .all_records(0, 10)
            .await
            .expect("listing should succeed");

        assert_eq!(page.content.len(), 2);
        assert_eq!(page.total_elements, 2);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_search_delegates_to_fda_client() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param(
                "search",
                "openfda.manufacturer_name:\"TARO\" AND openfda.brand_name:\"LORATADINE\"",
            ))
            .and(query_param("skip", "0"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "meta": { "results": { "skip": 0, "limit": 10, "total": 1 } },
                "results": [{ "application_number": "ANDA076805", "sponsor_name": "TARO" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let fda_client = FdaClient::new(
            server.uri(),
            Duration::from_millis(1000),
            Duration::from_millis(1000),
        )
        .expect("client should build");
        let service = test_service(&temp_dir, fda_client).await;

        let response = service
            .search("TARO", Some("LORATADINE"), 0, 10)
            .await
            .expect("search should succeed");

        let results = response.results.expect("results should be present");
        assert_eq!(results[0].application_number.as_deref(), Some("ANDA076805"));
    }
}
