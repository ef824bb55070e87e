//! Persistence interface and backend for drug application records.

pub mod sqlite;

pub use self::sqlite::SqliteRecordStore;

use async_trait::async_trait;

use crate::error::RecordResult;
use crate::record::{DrugApplicationRecord, RecordPage};

/// Storage capability for drug application records.
///
/// The record service only ever touches one key per invocation, so the
/// capability is deliberately narrow: keyed lookup, whole-entity save, and a
/// paged listing.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Looks up a record by its application number.
    async fn find_by_id(
        &self,
        application_number: &str,
    ) -> RecordResult<Option<DrugApplicationRecord>>;

    /// Persists the given record, replacing any stored state for its
    /// application number.
    async fn save(&self, record: &DrugApplicationRecord) -> RecordResult<DrugApplicationRecord>;

    /// Returns one page of records ordered by application number.
    async fn find_all(&self, page_number: u32, page_size: u32) -> RecordResult<RecordPage>;
}
