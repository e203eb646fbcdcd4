//! Service trait definitions for dependency injection
//!
//! Client fan-out is abstracted so handlers can be tested without sockets.

use async_trait::async_trait;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::error::WebServerResult;
use crate::types::ClientMessage;

/// WebSocket client management service trait
#[mockall::automock]
#[async_trait]
pub trait WebSocketManager: Send + Sync {
    /// Add new WebSocket client
    async fn add_client(&self, client_id: Uuid, sender: mpsc::Sender<ClientMessage>) -> WebServerResult<()>;

    /// Remove WebSocket client
    async fn remove_client(&self, client_id: Uuid) -> WebServerResult<()>;

    /// Broadcast message to all connected clients
    async fn broadcast(&self, message: ClientMessage) -> WebServerResult<()>;

    /// Send message to specific client
    async fn send_to_client(&self, client_id: Uuid, message: ClientMessage) -> WebServerResult<()>;

    /// Get count of active clients
    async fn client_count(&self) -> usize;

    /// Get list of active client IDs
    async fn active_clients(&self) -> Vec<Uuid>;
}
