//! # FDA Core
//!
//! Core business logic for the drug application records service.
//!
//! This crate contains pure record operations and their storage capability:
//! - upsert-merge reconciliation of drug application records
//! - the [`RecordStore`] capability with its SQLite backend
//! - search delegation to the OpenFDA client
//!
//! **No API concerns**: HTTP routing, request validation, and error bodies
//! belong in `api-rest`.

pub mod error;
pub mod record;
pub mod records;
pub mod store;

pub use error::{RecordError, RecordResult};
pub use record::{DrugApplicationRecord, RecordPage};
pub use records::DrugApplicationService;
pub use store::{RecordStore, SqliteRecordStore};
