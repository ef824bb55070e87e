//! # OpenFDA
//!
//! Client for the OpenFDA drugs@fda API.
//!
//! This crate contains everything that talks to, or speaks the language of,
//! the upstream drug-information API:
//! - construction of the `search` query value from request filters
//! - the HTTP client with its failure taxonomy (unavailable / rejected / decode)
//! - the response document types, deserialized for shape validation and
//!   relayed unmodified
//!
//! **No storage or API-surface concerns**: record persistence lives in
//! `fda-core`, HTTP routing in `api-rest`.

pub mod client;
pub mod query;
pub mod response;

pub use client::{FdaClient, FdaClientError};
pub use query::build_search_query;
pub use response::FdaResponse;
