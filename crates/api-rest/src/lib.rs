//! # API REST
//!
//! REST API implementation for the dental patient record service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, body limits)
//!
//! Uses `odonto-core` for the patient operations themselves.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{DefaultBodyLimit, Path as AxumPath, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use odonto_core::{
    ClinicalHistory, EvolutionEntry, Patient, PatientError, PatientPatch, PatientRecord,
    PatientService, Radiograph, Treatment,
};

/// Request body cap. Radiograph payloads arrive base64-encoded inside
/// the patient document and run to several megabytes each.
pub const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: PatientService,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Error body: a human-readable message plus the underlying detail.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
    pub detail: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct DeleteRes {
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_patients,
        get_patient,
        create_patient,
        update_patient,
        delete_patient,
    ),
    components(schemas(
        Patient,
        PatientRecord,
        PatientPatch,
        Treatment,
        ClinicalHistory,
        EvolutionEntry,
        Radiograph,
        HealthRes,
        ErrorBody,
        DeleteRes,
    ))
)]
struct ApiDoc;

type ErrorResponse = (StatusCode, Json<ErrorBody>);

/// Translate a core error into a status code and JSON body.
///
/// NotFound maps to 404, validation failures to 400, and anything the
/// store reports to 500. Nothing is retried here; a storage failure is
/// surfaced immediately and retry is the caller's decision.
fn error_response(context: &'static str, err: PatientError) -> ErrorResponse {
    let status = match err {
        PatientError::NotFound => StatusCode::NOT_FOUND,
        PatientError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("{context}: {err:?}");
    }
    (
        status,
        Json(ErrorBody {
            message: context.to_string(),
            detail: err.to_string(),
        }),
    )
}

/// Build the application router.
///
/// Only `allowed_origin` may invoke the API cross-origin; every other
/// origin is rejected at this boundary before reaching the core.
///
/// # Errors
/// Returns an error if `allowed_origin` is not a valid header value.
pub fn router(state: AppState, allowed_origin: &str) -> anyhow::Result<Router> {
    let origin: HeaderValue = allowed_origin.parse()?;
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        .route("/health", get(health))
        .route("/patients", get(list_patients))
        .route("/patients", post(create_patient))
        .route("/patients/:id", get(get_patient))
        .route("/patients/:id", put(update_patient))
        .route("/patients/:id", delete(delete_patient))
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .layer(cors)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint, used for monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Odonto REST API is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/patients",
    responses(
        (status = 200, description = "All patients, full documents", body = [Patient]),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
/// List every patient document, unfiltered and unpaginated.
#[axum::debug_handler]
async fn list_patients(
    State(state): State<AppState>,
) -> Result<Json<Vec<Patient>>, ErrorResponse> {
    let patients = state
        .service
        .list()
        .await
        .map_err(|e| error_response("Failed to list patients", e))?;
    Ok(Json(patients))
}

#[utoipa::path(
    get,
    path = "/patients/{id}",
    params(("id" = String, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "The matching patient", body = Patient),
        (status = 404, description = "No such patient", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
/// Fetch one patient by id. A malformed id behaves like an unknown one.
#[axum::debug_handler]
async fn get_patient(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<Patient>, ErrorResponse> {
    let patient = state
        .service
        .get(&id)
        .await
        .map_err(|e| error_response("Failed to fetch patient", e))?;
    Ok(Json(patient))
}

#[utoipa::path(
    post,
    path = "/patients",
    request_body = PatientRecord,
    responses(
        (status = 201, description = "Patient created", body = Patient),
        (status = 400, description = "Invalid payload", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
/// Create a patient. The store assigns the id.
///
/// The body is taken as raw JSON so that shape errors map to the 400
/// validation failure callers expect, not a generic rejection.
#[axum::debug_handler]
async fn create_patient(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<Patient>), ErrorResponse> {
    let record: PatientRecord = serde_json::from_value(payload).map_err(|e| {
        error_response(
            "Failed to create patient",
            PatientError::InvalidInput(e.to_string()),
        )
    })?;
    let patient = state
        .service
        .create(record)
        .await
        .map_err(|e| error_response("Failed to create patient", e))?;
    Ok((StatusCode::CREATED, Json(patient)))
}

#[utoipa::path(
    put,
    path = "/patients/{id}",
    params(("id" = String, Path, description = "Patient identifier")),
    request_body = PatientPatch,
    responses(
        (status = 200, description = "Patient after the merge", body = Patient),
        (status = 400, description = "Invalid payload", body = ErrorBody),
        (status = 404, description = "No such patient", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
/// Merge the supplied fields into a patient document.
///
/// Fields absent from the payload keep their stored value; collection
/// fields present in the payload are replaced wholesale.
#[axum::debug_handler]
async fn update_patient(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<Patient>, ErrorResponse> {
    let patch: PatientPatch = serde_json::from_value(payload).map_err(|e| {
        error_response(
            "Failed to update patient",
            PatientError::InvalidInput(e.to_string()),
        )
    })?;
    let patient = state
        .service
        .update(&id, patch)
        .await
        .map_err(|e| error_response("Failed to update patient", e))?;
    Ok(Json(patient))
}

#[utoipa::path(
    delete,
    path = "/patients/{id}",
    params(("id" = String, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "Patient removed", body = DeleteRes),
        (status = 404, description = "No such patient", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
/// Remove a patient and every collection embedded in its document.
#[axum::debug_handler]
async fn delete_patient(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<DeleteRes>, ErrorResponse> {
    state
        .service
        .delete(&id)
        .await
        .map_err(|e| error_response("Failed to delete patient", e))?;
    Ok(Json(DeleteRes {
        message: "patient deleted".into(),
    }))
}
