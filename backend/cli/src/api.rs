use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};

use billscan_core::BillRecord;
use billscan_inventory::InventoryService;

/// Shared application state for API handlers.
pub struct AppState {
    pub service: InventoryService,
}

/// Build the Axum router with all API routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/inventory/view", get(view_inventory))
        .route("/inventory/upload", post(upload_inventory))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "billscan inventory service is running",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now(),
    }))
}

/// Handler for `GET /inventory/view`.
async fn view_inventory(State(state): State<Arc<AppState>>) -> Json<Value> {
    let inventory = state.service.view().await;
    Json(json!({ "inventory": inventory }))
}

/// Handler for `POST /inventory/upload` (multipart, field `file`).
///
/// Extraction never fails the request: an unreadable bill comes back as a
/// placeholder record with status 200. Only a request with no file part at
/// all is rejected.
async fn upload_inventory(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<BillRecord>, StatusCode> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!(error = %e, "malformed multipart upload");
        StatusCode::BAD_REQUEST
    })? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload.jpg").to_string();
        let bytes = field.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "failed to read upload body");
            StatusCode::BAD_REQUEST
        })?;
        let record = state.service.upload(&filename, &bytes).await;
        return Ok(Json(record));
    }

    tracing::error!("upload request had no `file` part");
    Err(StatusCode::BAD_REQUEST)
}
