//! WebSocket client management service
//!
//! Tracks connected browser clients and fans published views out to them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

use shared::{ProcessId, process_debug, process_info, process_warn};

use crate::error::{WebServerError, WebServerResult};
use crate::traits::WebSocketManager;
use crate::types::ClientMessage;

#[derive(Debug)]
struct ClientConnection {
    sender: mpsc::Sender<ClientMessage>,
    connected_at: DateTime<Utc>,
}

/// Real WebSocket manager implementation
#[derive(Clone, Default)]
pub struct RealWebSocketManager {
    clients: Arc<RwLock<HashMap<Uuid, ClientConnection>>>,
}

impl RealWebSocketManager {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WebSocketManager for RealWebSocketManager {
    async fn add_client(&self, client_id: Uuid, sender: mpsc::Sender<ClientMessage>) -> WebServerResult<()> {
        let ack = ClientMessage::ConnectionAck {
            session_id: client_id,
            server_time: Utc::now().timestamp() as u64,
        };
        if let Err(e) = sender.try_send(ack) {
            process_warn!(ProcessId::current(), "Failed to send connection ack to {}: {}", client_id, e);
        }

        let mut clients = self.clients.write().await;
        clients.insert(
            client_id,
            ClientConnection {
                sender,
                connected_at: Utc::now(),
            },
        );
        process_info!(ProcessId::current(), "👋 Added WebSocket client {} ({} connected)", client_id, clients.len());
        Ok(())
    }

    async fn remove_client(&self, client_id: Uuid) -> WebServerResult<()> {
        let mut clients = self.clients.write().await;
        if let Some(connection) = clients.remove(&client_id) {
            let seconds = (Utc::now() - connection.connected_at).num_seconds();
            process_info!(ProcessId::current(), "👋 Removed WebSocket client {} after {}s", client_id, seconds);
        }
        Ok(())
    }

    async fn broadcast(&self, message: ClientMessage) -> WebServerResult<()> {
        // Snapshot the senders so the lock is not held while sending
        let senders: Vec<(Uuid, mpsc::Sender<ClientMessage>)> = {
            let clients = self.clients.read().await;
            clients
                .iter()
                .map(|(client_id, connection)| (*client_id, connection.sender.clone()))
                .collect()
        };

        if senders.is_empty() {
            process_debug!(ProcessId::current(), "📭 No WebSocket clients connected");
            return Ok(());
        }

        let mut closed = Vec::new();
        for (client_id, sender) in &senders {
            match sender.try_send(message.clone()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    process_warn!(ProcessId::current(), "Client {} channel full, dropping message", client_id);
                }
                Err(TrySendError::Closed(_)) => closed.push(*client_id),
            }
        }

        if !closed.is_empty() {
            let mut clients = self.clients.write().await;
            for client_id in &closed {
                clients.remove(client_id);
            }
            process_info!(ProcessId::current(), "🗑️ Removed {} disconnected clients during broadcast", closed.len());
        }

        process_debug!(
            ProcessId::current(),
            "📡 Broadcast to {}/{} clients",
            senders.len() - closed.len(),
            senders.len()
        );
        Ok(())
    }

    async fn send_to_client(&self, client_id: Uuid, message: ClientMessage) -> WebServerResult<()> {
        let sender = {
            let clients = self.clients.read().await;
            clients.get(&client_id).map(|connection| connection.sender.clone())
        };

        let Some(sender) = sender else {
            return Err(WebServerError::websocket(format!("Client {client_id} not found")));
        };

        match sender.try_send(message) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(WebServerError::websocket("Client channel full".to_string())),
            Err(TrySendError::Closed(_)) => {
                self.clients.write().await.remove(&client_id);
                Err(WebServerError::websocket("Client disconnected".to_string()))
            }
        }
    }

    async fn client_count(&self) -> usize {
        self.clients.read().await.len()
    }

    async fn active_clients(&self) -> Vec<Uuid> {
        self.clients.read().await.keys().copied().collect()
    }
}
