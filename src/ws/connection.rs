use std::{collections::HashMap, sync::Arc};

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{
    RwLock,
    mpsc::{self, error::TrySendError},
};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{ConnectionStatus, ConnectionStatusData, MessageType, WebSocketMessage},
    ws::MessageRouter,
};

/// Tracks the outgoing channel of every open dashboard socket
pub struct ConnectionManager {
    connections: RwLock<HashMap<Uuid, mpsc::Sender<Message>>>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new connection
    pub async fn register(&self, id: Uuid, sender: mpsc::Sender<Message>) {
        let mut connections = self.connections.write().await;
        connections.insert(id, sender);
        tracing::info!("Registered connection {}", id);
    }

    /// Unregister a connection
    pub async fn unregister(&self, id: &Uuid) {
        let mut connections = self.connections.write().await;
        connections.remove(id);
        tracing::info!("Unregistered connection {}", id);
    }

    /// Send a message to a specific connection
    pub async fn send_to(&self, connection_id: &Uuid, message: impl Serialize) -> Result<()> {
        let sender = self.sender(connection_id).await.ok_or_else(|| {
            AppError::WebSocket(format!("Connection {} not found", connection_id))
        })?;

        let message_json = serde_json::to_string(&message)?;
        if let Err(e) = sender.send(Message::Text(message_json.into())).await {
            tracing::error!("Failed to send message to {}: {}", connection_id, e);
            return Err(AppError::WebSocket(format!("Failed to send message: {}", e)));
        }
        Ok(())
    }

    /// Broadcast a message to all connections.
    ///
    /// Never waits on a client: a full queue drops this message for that
    /// client, a closed one is unregistered.
    pub async fn broadcast(&self, message: impl Serialize) -> Result<()> {
        let message_json = serde_json::to_string(&message)?;
        let senders: Vec<(Uuid, mpsc::Sender<Message>)> = {
            let connections = self.connections.read().await;
            connections
                .iter()
                .map(|(id, sender)| (*id, sender.clone()))
                .collect()
        };

        let mut closed = Vec::new();
        for (id, sender) in senders {
            match sender.try_send(Message::Text(message_json.clone().into())) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    tracing::warn!("Dropping message for slow connection {}", id);
                }
                Err(TrySendError::Closed(_)) => closed.push(id),
            }
        }

        for id in closed {
            self.unregister(&id).await;
        }

        Ok(())
    }

    /// Tell every open dashboard that the data changed underneath it
    pub async fn broadcast_snapshot_reloaded(&self, outcome: impl Serialize) -> Result<()> {
        let message = WebSocketMessage::new(MessageType::SnapshotReloaded, outcome);
        self.broadcast(message).await
    }

    /// Send a connection status update to a specific connection
    pub async fn send_connection_status(
        &self,
        connection_id: &Uuid,
        status: ConnectionStatus,
        cities: Vec<String>,
    ) -> Result<()> {
        let status_data = ConnectionStatusData { status, cities };
        let message = WebSocketMessage::new(MessageType::ConnectionStatus, status_data);
        self.send_to(connection_id, message).await
    }

    async fn sender(&self, connection_id: &Uuid) -> Option<mpsc::Sender<Message>> {
        let connections = self.connections.read().await;
        connections.get(connection_id).cloned()
    }

    /// Get the number of active connections
    pub async fn connection_count(&self) -> usize {
        let connections = self.connections.read().await;
        connections.len()
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

pub type SharedConnectionManager = Arc<ConnectionManager>;

/// Drive one dashboard socket until either side hangs up
pub async fn handle_socket(
    socket: WebSocket,
    connection_manager: SharedConnectionManager,
    router: Arc<dyn MessageRouter>,
    cities: Vec<String>,
) {
    let connection_id = Uuid::new_v4();
    tracing::info!("New websocket connection: {}", connection_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<Message>(100);

    connection_manager.register(connection_id, tx.clone()).await;

    if let Err(e) = connection_manager
        .send_connection_status(&connection_id, ConnectionStatus::Connected, cities)
        .await
    {
        tracing::error!("Error sending connection status: {}", e);
    }

    // Everything bound for the socket goes through the channel
    let mut forward_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if let Err(e) = sender.send(message).await {
                tracing::error!("Error sending WebSocket message: {}", e);
                break;
            }
        }
    });

    let manager = connection_manager.clone();
    let receive_router = router.clone();
    let mut receive_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Text(text)) => {
                    tracing::debug!("Received message: {}", text.as_str());

                    match serde_json::from_str::<WebSocketMessage<Value>>(text.as_str()) {
                        Ok(message) => {
                            if let Err(e) = receive_router
                                .route_message(connection_id, message, manager.clone())
                                .await
                            {
                                tracing::error!("Error routing message: {}", e);
                            }
                        }
                        Err(e) => {
                            tracing::error!("Error parsing message: {}", e);
                        }
                    }
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!("Ignoring binary message");
                }
                Ok(Message::Ping(data)) => {
                    if tx.send(Message::Pong(data)).await.is_err() {
                        break;
                    }
                }
                Ok(Message::Pong(_)) => {
                    tracing::debug!("Received pong");
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Client disconnected");
                    break;
                }
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut forward_task => receive_task.abort(),
        _ = &mut receive_task => forward_task.abort(),
    }

    connection_manager.unregister(&connection_id).await;
    router.connection_closed(connection_id).await;
    tracing::info!("WebSocket connection closed: {}", connection_id);
}
