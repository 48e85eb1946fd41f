use axum::{Json, extract::State};
use serde::Serialize;

use crate::{datasets::SnapshotSummary, handlers::AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub connections: usize,
    pub snapshot: SnapshotSummary,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = state.controller.snapshot().await;
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        connections: state.connection_manager.connection_count().await,
        snapshot: snapshot.summary(),
    })
}
