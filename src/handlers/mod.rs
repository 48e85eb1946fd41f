pub mod health;
pub mod reports;
pub mod ws;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    controller::Controller,
    ws::{ConnectionManager, DashboardMessageRouter, MessageRouter},
};

pub use health::health;
pub use reports::*;
pub use ws::ws_handler;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<Controller>,
    pub connection_manager: Arc<ConnectionManager>,
    pub message_router: Arc<dyn MessageRouter>,
}

impl AppState {
    pub fn new(controller: Arc<Controller>) -> Self {
        let connection_manager = Arc::new(ConnectionManager::new());
        let message_router = Arc::new(DashboardMessageRouter::new(controller.clone()));

        Self {
            controller,
            connection_manager,
            message_router,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Dashboard
        .route("/", get(dashboard))
        .route("/reports.txt", get(catalog_text))
        // JSON API
        .route("/api/reports", get(list_reports))
        .route("/api/reports/{id}", get(get_report))
        .route("/api/catalog", get(get_catalog))
        .route("/api/cities", get(get_cities))
        .route("/api/reload", post(reload))
        // Health and live updates
        .route("/health", get(health))
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
