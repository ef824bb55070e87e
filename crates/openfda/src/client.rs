//! HTTP client for the drugs@fda endpoint.

use std::time::Duration;

use reqwest::StatusCode;

use crate::query::build_search_query;
use crate::response::FdaResponse;

#[derive(Debug, thiserror::Error)]
pub enum FdaClientError {
    #[error("failed to configure the OpenFDA HTTP client: {0}")]
    Configuration(reqwest::Error),
    #[error("error connecting to the OpenFDA API: {0}")]
    Unavailable(reqwest::Error),
    #[error("OpenFDA API rejected the request with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("failed to decode the OpenFDA API response: {0}")]
    Decode(reqwest::Error),
}

pub type FdaClientResult<T> = std::result::Result<T, FdaClientError>;

/// Client for searching drug applications in the OpenFDA API.
///
/// Holds the endpoint base URL and a pooled `reqwest::Client` configured with
/// the connect and read timeouts resolved at startup. Cloning is cheap; the
/// underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct FdaClient {
    client: reqwest::Client,
    base_url: String,
}

impl FdaClient {
    /// Creates a client for the given endpoint.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Full URL of the drugs@fda endpoint
    /// * `connect_timeout` - TCP connect timeout
    /// * `read_timeout` - Total per-request timeout
    ///
    /// # Errors
    ///
    /// Returns `FdaClientError::Configuration` if the underlying HTTP client
    /// cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        connect_timeout: Duration,
        read_timeout: Duration,
    ) -> FdaClientResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(read_timeout)
            .build()
            .map_err(FdaClientError::Configuration)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Searches for drug application records in the OpenFDA API.
    ///
    /// Builds the `search` query value from the given filters and issues a
    /// single GET request; `skip` and `limit` are passed through as decimal
    /// integers. The response is deserialized for shape validation only and
    /// returned as-is. Failures are classified, never retried:
    ///
    /// * transport-level failure - [`FdaClientError::Unavailable`]
    /// * non-success status - [`FdaClientError::Rejected`] with the original
    ///   status code and body text preserved
    /// * undecodable success body - [`FdaClientError::Decode`]
    pub async fn search(
        &self,
        manufacturer_name: &str,
        brand_name: Option<&str>,
        skip: u32,
        limit: u32,
    ) -> FdaClientResult<FdaResponse> {
        tracing::info!(
            "Searching for drug applications with manufacturer: {}, brand: {:?}, skip: {}, limit: {}",
            manufacturer_name,
            brand_name,
            skip,
            limit
        );

        let search_query = build_search_query(manufacturer_name, brand_name);

        let request = self
            .client
            .get(&self.base_url)
            .query(&[("search", search_query.as_str())])
            .query(&[("skip", skip), ("limit", limit)])
            .build()
            .map_err(FdaClientError::Configuration)?;

        tracing::debug!("OpenFDA API request URL: {}", request.url());

        let response = self
            .client
            .execute(request)
            .await
            .map_err(FdaClientError::Unavailable)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("OpenFDA API returned {}: {}", status, body);
            return Err(FdaClientError::Rejected { status, body });
        }

        let parsed = response
            .json::<FdaResponse>()
            .await
            .map_err(FdaClientError::Decode)?;

        tracing::info!(
            "Retrieved {} drug application records from the OpenFDA API",
            parsed.results.as_ref().map_or(0, Vec::len)
        );

        Ok(parsed)
    }
}
