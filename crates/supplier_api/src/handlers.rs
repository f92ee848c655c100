//! Endpoint handlers.
//!
//! Listing endpoints degrade to `[]` when storage is unconfigured; single
//! lookups and writes report it as a server error instead.

use crate::error::ApiError;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::Json;
use log::error;
use serde_json::{json, Value};
use supplier_core::{
    liveness_message, CaseStudy, Diagnostics, IndustrySolution, Product, Stored,
};

pub async fn root() -> Json<Value> {
    Json(json!({ "message": liveness_message() }))
}

/// Connectivity report. Never fails; faults become status text.
pub async fn diagnostics(State(state): State<AppState>) -> Json<Diagnostics> {
    let backend = state.backend().clone();
    match tokio::task::spawn_blocking(move || backend.diagnostics()).await {
        Ok(report) => Json(report),
        Err(err) => {
            error!("event=diagnostics module=api status=error error={err}");
            Json(Diagnostics {
                backend: "✅ Running".to_string(),
                database: format!("❌ Error: {err}"),
                database_url: None,
                database_name: None,
                connection_status: "Not Connected".to_string(),
                collections: Vec::new(),
            })
        }
    }
}

pub async fn seed(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.run(|backend| backend.seed_demo_data()).await?;
    Ok(Json(json!({ "status": "ok" })))
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Stored<Product>>>, ApiError> {
    let products = or_empty(state.run(|backend| backend.list_products()).await)?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Stored<Product>>, ApiError> {
    let product = state.run(move |backend| backend.get_product(&slug)).await?;
    Ok(Json(product))
}

/// Filters by `segment`; when the parameter repeats, the last value wins.
pub async fn list_solutions(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Stored<IndustrySolution>>>, ApiError> {
    let segment = params
        .into_iter()
        .rev()
        .find_map(|(key, value)| (key == "segment").then_some(value));
    let solutions = or_empty(
        state
            .run(move |backend| backend.list_solutions(segment.as_deref()))
            .await,
    )?;
    Ok(Json(solutions))
}

pub async fn list_case_studies(
    State(state): State<AppState>,
) -> Result<Json<Vec<Stored<CaseStudy>>>, ApiError> {
    let case_studies = or_empty(state.run(|backend| backend.list_case_studies()).await)?;
    Ok(Json(case_studies))
}

/// Accepts an RFQ body; the raw bytes are parsed here so malformed JSON is a
/// 400 like any other validation failure.
pub async fn submit_rfq(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let payload: Value =
        serde_json::from_slice(&body).map_err(|err| ApiError::BadRequest(err.to_string()))?;
    let id = state.run(move |backend| backend.submit_rfq(&payload)).await?;
    Ok(Json(json!({ "status": "received", "id": id })))
}

fn or_empty<T>(result: Result<Vec<T>, ApiError>) -> Result<Vec<T>, ApiError> {
    match result {
        Err(ApiError::StorageUnavailable) => Ok(Vec::new()),
        other => other,
    }
}
