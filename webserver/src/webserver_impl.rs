//! Main webserver implementation
//!
//! The WebServer owns the shared state and an injected WebSocket manager.
//! Every publication from either last-write-wins slot is forwarded to all
//! connected clients.

use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use engine::PublicationReceiver;
use shared::{MapViewSet, ProcessId, ViewSet, logging, process_info, process_warn};

use crate::error::{WebServerError, WebServerResult};
use crate::state::WebServerState;
use crate::traits::WebSocketManager;
use crate::types::ClientMessage;
use crate::web::handlers::{api, websocket};

/// Main webserver struct with dependency injection
#[derive(Clone)]
pub struct WebServer<W: WebSocketManager> {
    state: Arc<WebServerState>,
    websocket_manager: W,
}

impl<W: WebSocketManager> WebServer<W> {
    pub fn new(state: WebServerState, websocket_manager: W) -> Self {
        Self {
            state: Arc::new(state),
            websocket_manager,
        }
    }

    pub fn state(&self) -> &Arc<WebServerState> {
        &self.state
    }

    pub fn websocket_manager(&self) -> &W {
        &self.websocket_manager
    }
}

impl<W> WebServer<W>
where
    W: WebSocketManager + Clone + 'static,
{
    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/health", get(api::health::<W>))
            .route("/api/page", get(api::page))
            .route("/api/controls", get(api::controls::<W>))
            .route("/api/overview", get(api::get_overview::<W>).post(api::post_overview::<W>))
            .route("/api/map", get(api::get_map::<W>))
            .route("/ws", get(websocket::websocket_handler::<W>))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive()),
            )
            .with_state(self.clone())
    }

    /// Broadcast every new publication to all connected clients
    pub fn spawn_publication_forwarder(&self) -> tokio::task::JoinHandle<()> {
        let mut overview_rx: PublicationReceiver<ViewSet> = self.state.overview.subscribe();
        let mut map_rx: PublicationReceiver<MapViewSet> = self.state.map.subscribe();
        let manager = self.websocket_manager.clone();

        tokio::spawn(async move {
            loop {
                let message = tokio::select! {
                    changed = overview_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let latest = overview_rx.borrow_and_update().clone();
                        latest.map(|p| ClientMessage::OverviewUpdate {
                            ticket: p.ticket,
                            view: p.value.clone(),
                        })
                    }
                    changed = map_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let latest = map_rx.borrow_and_update().clone();
                        latest.map(|p| ClientMessage::MapUpdate {
                            ticket: p.ticket,
                            view: p.value.clone(),
                        })
                    }
                };

                if let Some(message) = message {
                    if let Err(e) = manager.broadcast(message).await {
                        process_warn!(ProcessId::current(), "Failed to broadcast publication: {}", e);
                    }
                }
            }
        })
    }

    /// Start the webserver and serve until Ctrl+C
    pub async fn run(&self) -> WebServerResult<()> {
        let bind_address = self.state.bind_address;
        let listener = tokio::net::TcpListener::bind(bind_address)
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Failed to bind to {bind_address}: {e}")))?;

        let forwarder = self.spawn_publication_forwarder();

        process_info!(ProcessId::current(), "🌐 Web server listening on http://{}", bind_address);

        let router = self.build_router();
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                if tokio::signal::ctrl_c().await.is_ok() {
                    logging::log_shutdown(ProcessId::current(), "Received Ctrl+C signal");
                }
            })
            .await
            .map_err(WebServerError::IoError)?;

        forwarder.abort();
        Ok(())
    }
}
