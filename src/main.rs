//! FDA drug application records service binary.
//!
//! Resolves configuration from the environment once at startup, wires the
//! record store, OpenFDA client, and record service together, and serves the
//! REST API.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use fda_core::{DrugApplicationService, SqliteRecordStore};
use openfda::FdaClient;

const DEFAULT_OPENFDA_BASE_URL: &str = "https://api.fda.gov/drug/drugsfda.json";

/// Main entry point for the FDA records service.
///
/// Starts the REST server on the configured address (default: 0.0.0.0:3000).
/// Provides HTTP endpoints for drug application record operations with
/// OpenAPI/Swagger documentation.
///
/// # Environment Variables
/// - `FDA_RECORDS_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `FDA_RECORDS_DB`: SQLite database file (default: "data/fda_records.db")
/// - `OPENFDA_API_BASE_URL`: drugs@fda endpoint URL
/// - `OPENFDA_CONNECT_TIMEOUT_MS`: upstream connect timeout (default: 1000)
/// - `OPENFDA_READ_TIMEOUT_MS`: upstream read timeout (default: 1000)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the record database cannot be opened or migrated,
/// - the OpenFDA client cannot be configured, or
/// - the server address cannot be bound.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fda_records_run=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("FDA_RECORDS_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let db_path = std::env::var("FDA_RECORDS_DB").unwrap_or_else(|_| "data/fda_records.db".into());
    let base_url =
        std::env::var("OPENFDA_API_BASE_URL").unwrap_or_else(|_| DEFAULT_OPENFDA_BASE_URL.into());
    let connect_timeout = env_timeout("OPENFDA_CONNECT_TIMEOUT_MS", 1000)?;
    let read_timeout = env_timeout("OPENFDA_READ_TIMEOUT_MS", 1000)?;

    tracing::info!("-- Starting FDA records REST API on {}", addr);
    tracing::info!("-- Record database: {}", db_path);
    tracing::info!("-- OpenFDA endpoint: {}", base_url);

    let store = SqliteRecordStore::from_path(&db_path).await?;
    let fda_client = FdaClient::new(base_url, connect_timeout, read_timeout)?;
    let service = DrugApplicationService::new(Arc::new(store), fda_client);

    let app = router(AppState { service });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Reads a millisecond duration from the environment, falling back to the
/// given default when the variable is unset.
fn env_timeout(name: &str, default_ms: u64) -> anyhow::Result<Duration> {
    let ms = match std::env::var(name) {
        Ok(value) => value
            .parse::<u64>()
            .map_err(|e| anyhow::anyhow!("invalid {name}: {e}"))?,
        Err(_) => default_ms,
    };

    Ok(Duration::from_millis(ms))
}
