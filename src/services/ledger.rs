//! Dashboard Routes
//!
//! Read-only views over the ledger: batch lookup, the transaction timeline and
//! one record per role dashboard.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PortalError;
use crate::ledger::{
    farm_map, lookup_location, predict, BatchTrail, CollectorRecord, DistributorRecord,
    FarmerRecord, ManufacturerRecord, MapView, Timeline, DEMO_BATCH_ID,
};
use crate::server::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/batches", get(list_batches))
        .route("/api/lookup", post(lookup_batch))
        .route("/api/transactions", get(transactions))
        .route("/api/farmer/{id}", get(farmer_dashboard))
        .route("/api/farmer/{id}/predict", post(farmer_predict))
        .route("/api/collector/{id}", get(collector_dashboard))
        .route("/api/distributor/{id}", get(distributor_dashboard))
        .route("/api/manufacturer/{id}", get(manufacturer_dashboard))
}

async fn list_batches(State(state): State<AppState>) -> Json<Vec<BatchTrail>> {
    Json(state.ledger.batches().cloned().collect())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest {
    batch_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupResponse {
    batch_id: String,
    location: String,
    known: bool,
}

/// Manual entry or QR scan result
async fn lookup_batch(
    State(state): State<AppState>,
    request: Result<Json<LookupRequest>, JsonRejection>,
) -> Result<Json<LookupResponse>, PortalError> {
    let Json(request) = request.map_err(|_| PortalError::BadRequest("Batch ID is required"))?;
    let batch_id = request.batch_id.trim();
    if batch_id.is_empty() {
        return Err(PortalError::BadRequest("Batch ID is required"));
    }

    debug!("Batch lookup for {}", batch_id);
    Ok(Json(LookupResponse {
        batch_id: batch_id.to_string(),
        location: lookup_location(batch_id),
        known: state.ledger.batch(batch_id).is_some(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionsQuery {
    batch_id: Option<String>,
}

/// Timeline for `batchId`. A missing or blank id falls back to the demo
/// batch; an id the ledger doesn't know answers 404.
async fn transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Json<Timeline>, PortalError> {
    let batch_id = query
        .batch_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or(DEMO_BATCH_ID);

    debug!("Timeline for batch {}", batch_id);
    state
        .ledger
        .timeline(batch_id)
        .map(Json)
        .ok_or(PortalError::NotFound("Batch"))
}

#[derive(Debug, Serialize)]
struct FarmerDashboard {
    #[serde(flatten)]
    record: FarmerRecord,
    map: MapView,
}

async fn farmer_dashboard(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FarmerDashboard>, PortalError> {
    let record = state.ledger.farmer(&id).ok_or(PortalError::NotFound("Farmer"))?;
    let map = farm_map(
        record.location.latitude,
        record.location.longitude,
        &record.location.address,
        state.config.mapbox_token.as_deref(),
    );

    Ok(Json(FarmerDashboard {
        record: record.clone(),
        map,
    }))
}

async fn farmer_predict(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, PortalError> {
    let record = state.ledger.farmer(&id).ok_or(PortalError::NotFound("Farmer"))?;
    Ok(Json(serde_json::json!({ "prediction": predict(record) })))
}

async fn collector_dashboard(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CollectorRecord>, PortalError> {
    state
        .ledger
        .collector(&id)
        .cloned()
        .map(Json)
        .ok_or(PortalError::NotFound("Collector"))
}

async fn distributor_dashboard(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DistributorRecord>, PortalError> {
    state
        .ledger
        .distributor(&id)
        .cloned()
        .map(Json)
        .ok_or(PortalError::NotFound("Distributor"))
}

async fn manufacturer_dashboard(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ManufacturerRecord>, PortalError> {
    state
        .ledger
        .manufacturer(&id)
        .cloned()
        .map(Json)
        .ok_or(PortalError::NotFound("Manufacturer"))
}
