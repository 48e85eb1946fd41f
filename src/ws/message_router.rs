use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    controller::Controller,
    error::{AppError, Result},
    models::{MessageType, ReportId, ReportUpdateData, SelectCityData, WebSocketMessage},
    render::render_report_body,
    services::ReportParams,
    ws::connection::SharedConnectionManager,
};

/// Message router trait for handling websocket messages
#[async_trait]
pub trait MessageRouter: Send + Sync {
    async fn route_message(
        &self,
        connection_id: Uuid,
        message: WebSocketMessage<Value>,
        connection_manager: SharedConnectionManager,
    ) -> Result<()>;

    /// Forget any per-connection state
    async fn connection_closed(&self, connection_id: Uuid);
}

/// Routes city selector traffic from dashboard pages.
///
/// Only the contact report depends on the selected city, so a selection
/// change recomputes that one report and nothing else.
pub struct DashboardMessageRouter {
    controller: Arc<Controller>,
    selections: RwLock<HashMap<Uuid, String>>,
}

impl DashboardMessageRouter {
    pub fn new(controller: Arc<Controller>) -> Self {
        Self {
            controller,
            selections: RwLock::new(HashMap::new()),
        }
    }

    pub async fn selected_city(&self, connection_id: &Uuid) -> Option<String> {
        let selections = self.selections.read().await;
        selections.get(connection_id).cloned()
    }

    async fn handle_select_city(
        &self,
        connection_id: Uuid,
        data: Value,
        connection_manager: SharedConnectionManager,
    ) -> Result<()> {
        let request: SelectCityData = serde_json::from_value(data)
            .map_err(|e| AppError::BadRequest(format!("Invalid city selection: {}", e)))?;

        tracing::debug!("Connection {} selected city {}", connection_id, request.city);
        self.selections
            .write()
            .await
            .insert(connection_id, request.city.clone());

        self.send_contact_report(connection_id, ReportParams::for_city(request.city), connection_manager)
            .await
    }

    async fn handle_refresh(
        &self,
        connection_id: Uuid,
        connection_manager: SharedConnectionManager,
    ) -> Result<()> {
        let params = ReportParams {
            city: self.selected_city(&connection_id).await,
        };
        self.send_contact_report(connection_id, params, connection_manager)
            .await
    }

    async fn send_contact_report(
        &self,
        connection_id: Uuid,
        params: ReportParams,
        connection_manager: SharedConnectionManager,
    ) -> Result<()> {
        let report = self
            .controller
            .run_report(ReportId::ProviderContacts, &params)
            .await;
        let html = render_report_body(&report);

        let message = WebSocketMessage::new(MessageType::ReportUpdate, ReportUpdateData { report, html });
        connection_manager.send_to(&connection_id, message).await
    }

    async fn handle_ping(
        &self,
        connection_id: Uuid,
        connection_manager: SharedConnectionManager,
    ) -> Result<()> {
        let message = WebSocketMessage::new(MessageType::Pong, Value::Null);
        connection_manager.send_to(&connection_id, message).await
    }
}

#[async_trait]
impl MessageRouter for DashboardMessageRouter {
    async fn route_message(
        &self,
        connection_id: Uuid,
        message: WebSocketMessage<Value>,
        connection_manager: SharedConnectionManager,
    ) -> Result<()> {
        match message.type_.parse::<MessageType>() {
            Ok(MessageType::SelectCity) => {
                self.handle_select_city(connection_id, message.data, connection_manager)
                    .await
            }
            Ok(MessageType::Refresh) => self.handle_refresh(connection_id, connection_manager).await,
            Ok(MessageType::Ping) => self.handle_ping(connection_id, connection_manager).await,
            _ => {
                tracing::warn!("Unknown message type: {}", message.type_);
                Ok(())
            }
        }
    }

    async fn connection_closed(&self, connection_id: Uuid) {
        self.selections.write().await.remove(&connection_id);
    }
}
