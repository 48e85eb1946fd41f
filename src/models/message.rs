use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::report::ReportResult;

/// WebSocket message types that can be handled by the server
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// City selector changed on a client
    SelectCity,
    /// Client asks for its current selection to be recomputed
    Refresh,
    /// Recomputed report sent to a client
    ReportUpdate,
    /// The data snapshot was replaced
    SnapshotReloaded,
    /// Connection status update to client
    ConnectionStatus,
    /// Ping message
    Ping,
    /// Pong message
    Pong,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::SelectCity => "select_city",
            MessageType::Refresh => "refresh",
            MessageType::ReportUpdate => "report_update",
            MessageType::SnapshotReloaded => "snapshot_reloaded",
            MessageType::ConnectionStatus => "connection_status",
            MessageType::Ping => "ping",
            MessageType::Pong => "pong",
        }
    }
}

impl FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| format!("Unknown message type: {}", s))
    }
}

/// WebSocket message structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessage<T> {
    /// Message type
    #[serde(rename = "type")]
    pub type_: String,
    /// Message data
    #[serde(default)]
    pub data: T,
    /// Timestamp when the message was created
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// Optional message ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
}

impl<T> WebSocketMessage<T> {
    pub fn new(type_: MessageType, data: T) -> Self {
        Self {
            type_: type_.as_str().to_string(),
            data,
            timestamp: Utc::now(),
            id: Some(Uuid::new_v4()),
        }
    }
}

/// Connection status message sent to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionStatusData {
    pub status: ConnectionStatus,
    /// Values the city selector may take.
    pub cities: Vec<String>,
}

/// Connection status enum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Connected,
}

/// Payload of a `select_city` request
#[derive(Debug, Clone, Deserialize)]
pub struct SelectCityData {
    pub city: String,
}

/// A recomputed report and its rendered HTML fragment
#[derive(Debug, Clone, Serialize)]
pub struct ReportUpdateData {
    pub report: ReportResult,
    pub html: String,
}
