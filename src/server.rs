use axum::{
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use hyper::Server;
use serde::Deserialize;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::domain::HospitalRecord;
use crate::error::DirectoryError;
use crate::pipeline::storage::SharedDirectory;
use crate::query::SearchQuery;

/// Maps query errors onto HTTP status codes
pub struct ApiError(DirectoryError);

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DirectoryError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            DirectoryError::NotFound { .. } => StatusCode::NOT_FOUND,
            other => {
                error!("Request failed: {}", other);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Debug, Default, Deserialize)]
pub struct HospitalFilter {
    pub state: Option<String>,
    pub district: Option<String>,
    pub locality: Option<String>,
}

/// Health check endpoint
async fn health(State(directory): State<SharedDirectory>) -> impl IntoResponse {
    let summary = directory.current().summary();
    Json(serde_json::json!({
        "status": "healthy",
        "service": "hospital-directory",
        "version": env!("CARGO_PKG_VERSION"),
        "hospitals": summary.records,
        "loadedAt": summary.loaded_at,
    }))
}

/// District (with optional locality) wins over state, which wins over a
/// bare locality; no filter lists everything.
async fn list_hospitals(
    State(directory): State<SharedDirectory>,
    Query(filter): Query<HospitalFilter>,
) -> ApiResult<Vec<HospitalRecord>> {
    let directory = directory.current();
    let records = match filter {
        HospitalFilter {
            district: Some(district),
            locality,
            ..
        } => directory.by_district(&district, locality.as_deref())?,
        HospitalFilter {
            state: Some(state), ..
        } => directory.by_state(&state)?,
        HospitalFilter {
            locality: Some(locality),
            ..
        } => directory.by_locality(&locality)?,
        _ => directory.list_all(),
    };
    Ok(Json(records))
}

async fn get_hospital(
    State(directory): State<SharedDirectory>,
    Path(id): Path<String>,
) -> ApiResult<HospitalRecord> {
    Ok(Json(directory.current().by_id(&id)?))
}

async fn search(
    State(directory): State<SharedDirectory>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<HospitalRecord>> {
    Ok(Json(directory.current().search(&query)?))
}

async fn districts(State(directory): State<SharedDirectory>) -> Json<Vec<String>> {
    Json(directory.current().districts())
}

async fn states(State(directory): State<SharedDirectory>) -> Json<Vec<String>> {
    Json(directory.current().states())
}

async fn districts_for_state(
    State(directory): State<SharedDirectory>,
    Path(state): Path<String>,
) -> ApiResult<Vec<String>> {
    Ok(Json(directory.current().districts_for_state(&state)?))
}

/// Create the HTTP router over the shared directory
pub fn create_server(directory: SharedDirectory) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/hospitals", get(list_hospitals))
        .route("/api/hospitals/:id", get(get_hospital))
        .route("/api/search", get(search))
        .route("/api/districts", get(districts))
        .route("/api/states", get(states))
        .route("/api/states/:state/districts", get(districts_for_state))
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(directory)
}

/// Start the HTTP server on the given address
pub async fn start_server(directory: SharedDirectory, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_server(directory);

    info!("HTTP server running on http://{addr}");
    info!("Health check: http://{addr}/health");

    Server::bind(&addr).serve(app.into_make_service()).await?;

    Ok(())
}
