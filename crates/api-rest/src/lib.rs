//! # API REST
//!
//! REST API for the drug application records service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - boundary validation and error bodies
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS)
//!
//! Uses `fda-core` for record operations and `openfda` for upstream
//! document types.

#![warn(rust_2018_idioms)]

pub mod dto;
pub mod error;

use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use fda_core::DrugApplicationService;
use openfda::response::{
    ActiveIngredient, DrugApplicationResult, FdaResponse, Meta, OpenFda, Product, ResultsMeta,
    Submission,
};

use crate::dto::{
    DrugApplicationRecordResponse, ListParams, PageResponse, SearchParams,
    StoreDrugApplicationRecordRequest,
};
use crate::error::ApiError;

/// Application state shared across the REST handlers.
///
/// Holds the record service; everything the handlers need hangs off it.
#[derive(Clone)]
pub struct AppState {
    pub service: DrugApplicationService,
}

/// Health check response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub ok: bool,
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        search_drug_application_records,
        store_drug_application_record,
        get_all_drug_application_records,
        get_drug_application_record_by_id,
    ),
    components(schemas(
        HealthResponse,
        StoreDrugApplicationRecordRequest,
        DrugApplicationRecordResponse,
        PageResponse,
        FdaResponse,
        Meta,
        ResultsMeta,
        DrugApplicationResult,
        Submission,
        OpenFda,
        Product,
        ActiveIngredient,
    ))
)]
struct ApiDoc;

/// Builds the service router.
///
/// Mounts the record endpoints under `/v1/drug-application-records`, the
/// health check at `/health`, and the Swagger UI at `/swagger-ui` with the
/// OpenAPI document at `/api-docs/openapi.json`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/v1/drug-application-records/search",
            get(search_drug_application_records),
        )
        .route(
            "/v1/drug-application-records",
            post(store_drug_application_record),
        )
        .route(
            "/v1/drug-application-records",
            get(get_all_drug_application_records),
        )
        .route(
            "/v1/drug-application-records/:application_number",
            get(get_drug_application_record_by_id),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthResponse)
    )
)]
/// Health check endpoint.
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        message: "FDA records API is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/v1/drug-application-records/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Search completed successfully", body = FdaResponse),
        (status = 400, description = "Invalid parameters provided"),
        (status = 503, description = "OpenFDA API unavailable")
    )
)]
/// Searches for drug applications in the OpenFDA database.
///
/// Validates the filters, delegates to the record service, and relays the
/// upstream document unmodified. Upstream failures are classified by
/// [`ApiError`]: 503 when the API cannot be reached, the original status
/// when it rejected the request.
#[axum::debug_handler]
async fn search_drug_application_records(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<FdaResponse>, ApiError> {
    tracing::info!(
        "Received request to search drug application records with manufacturer: {:?}, brand: {:?}",
        params.manufacturer_name,
        params.brand_name
    );

    let filter = params.validate().map_err(ApiError::Validation)?;
    let response = state
        .service
        .search(
            filter.manufacturer_name.as_str(),
            filter.brand_name.as_deref(),
            filter.skip,
            filter.limit,
        )
        .await?;

    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/v1/drug-application-records",
    request_body = StoreDrugApplicationRecordRequest,
    responses(
        (status = 201, description = "Drug application record stored successfully", body = DrugApplicationRecordResponse),
        (status = 400, description = "Invalid drug application record data provided")
    )
)]
/// Stores specific drug application record details.
///
/// Creates the record when the application number is new; otherwise
/// overwrites the manufacturer and substance names and unions the product
/// numbers into the stored set. Returns the persisted state either way.
#[axum::debug_handler]
async fn store_drug_application_record(
    State(state): State<AppState>,
    Json(body): Json<StoreDrugApplicationRecordRequest>,
) -> Result<(StatusCode, Json<DrugApplicationRecordResponse>), ApiError> {
    tracing::info!(
        "Received request to store drug application record: {}",
        body.application_number
    );

    let valid = body.validate().map_err(ApiError::Validation)?;
    let record = state
        .service
        .save_record(
            valid.application_number.as_str(),
            valid.manufacturer_name.as_str(),
            valid.substance_name.as_str(),
            valid.product_numbers,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

#[utoipa::path(
    get,
    path = "/v1/drug-application-records",
    params(ListParams),
    responses(
        (status = 200, description = "Successfully retrieved drug application records", body = PageResponse)
    )
)]
/// Gets all drug application records stored in the system, paginated.
#[axum::debug_handler]
async fn get_all_drug_application_records(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PageResponse>, ApiError> {
    tracing::info!(
        "Received request to get all drug application records, page: {}, size: {}",
        params.page,
        params.size
    );

    let (page, size) = params.validate().map_err(ApiError::Validation)?;
    let records = state.service.all_records(page, size).await?;

    Ok(Json(records.into()))
}

#[utoipa::path(
    get,
    path = "/v1/drug-application-records/{applicationNumber}",
    params(
        ("applicationNumber" = String, Path, description = "Application number")
    ),
    responses(
        (status = 200, description = "Successfully retrieved the drug application record", body = DrugApplicationRecordResponse),
        (status = 404, description = "Drug application record not found")
    )
)]
/// Gets a drug application record by its application number.
///
/// An unknown application number yields an empty 404, not an error body.
#[axum::debug_handler]
async fn get_drug_application_record_by_id(
    State(state): State<AppState>,
    AxumPath(application_number): AxumPath<String>,
) -> Result<Response, ApiError> {
    tracing::info!(
        "Received request to get drug application record by ID: {}",
        application_number
    );

    match state.service.record_by_id(&application_number).await? {
        Some(record) => {
            Ok(Json(DrugApplicationRecordResponse::from(record)).into_response())
        }
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}
