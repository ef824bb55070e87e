//! Stored record types.

use std::collections::BTreeSet;

/// A drug application record stored in the system.
///
/// The application number is the record's sole identity and never changes
/// once the record exists. Product numbers are a set: duplicates collapse,
/// and the set only ever grows through the upsert-merge path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrugApplicationRecord {
    /// Application number, used as the primary key.
    pub application_number: String,
    /// Name of the manufacturer.
    pub manufacturer_name: String,
    /// Name of the substance.
    pub substance_name: String,
    /// Product numbers associated with this application.
    pub product_numbers: BTreeSet<String>,
}

/// One page of stored records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPage {
    /// Records on this page, ordered by application number.
    pub content: Vec<DrugApplicationRecord>,
    /// Zero-based page number.
    pub page_number: u32,
    /// Requested page size.
    pub page_size: u32,
    /// Total number of stored records.
    pub total_elements: u64,
    /// Total number of pages at this page size.
    pub total_pages: u32,
}
