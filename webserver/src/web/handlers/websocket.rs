//! WebSocket connection handler
//!
//! Browser clients receive every published overview and map result. They can
//! also submit change events over the socket. Each event takes its ticket in
//! the receive loop and is recomputed on its own task, so overlapping events
//! resolve last-write-wins in the order the client sent them.

use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use shared::{FilterState, MapSelection, ProcessId, logging, process_debug, process_error, process_info, process_warn};

use crate::error::{WebServerError, WebServerResult};
use crate::state::WebServerState;
use crate::traits::WebSocketManager;
use crate::types::{ClientMessage, ClientRequest};
use crate::webserver_impl::WebServer;

/// WebSocket connection handler
pub async fn websocket_handler<W>(ws: WebSocketUpgrade, State(server): State<WebServer<W>>) -> Response
where
    W: WebSocketManager + Clone + 'static,
{
    ws.on_upgrade(move |socket| handle_websocket(socket, server))
}

/// Handle individual WebSocket connection
async fn handle_websocket<W>(socket: WebSocket, server: WebServer<W>)
where
    W: WebSocketManager + Clone + 'static,
{
    let client_id = Uuid::new_v4();
    process_info!(ProcessId::current(), "🔗 New WebSocket connection: {}", client_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ClientMessage>(100);

    if let Err(e) = server.websocket_manager().add_client(client_id, tx).await {
        process_error!(ProcessId::current(), "Failed to register WebSocket client {}: {}", client_id, e);
        return;
    }

    let outgoing_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let json_msg = match serde_json::to_string(&msg) {
                Ok(json) => json,
                Err(e) => {
                    process_warn!(ProcessId::current(), "Failed to serialize client message: {}", e);
                    continue;
                }
            };

            if sender.send(Message::Text(json_msg)).await.is_err() {
                break;
            }
        }
    });

    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                process_warn!(ProcessId::current(), "WebSocket error for client {}: {}", client_id, e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                // Accepted here, in arrival order, so tickets follow the client's event order
                let spawned = serde_json::from_str::<ClientRequest>(&text)
                    .map_err(WebServerError::from)
                    .and_then(|request| spawn_client_request(client_id, request, &server));
                if let Err(e) = spawned {
                    report_error(&server, client_id, &e).await;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    outgoing_task.abort();
    if let Err(e) = server.websocket_manager().remove_client(client_id).await {
        process_warn!(ProcessId::current(), "Failed to remove client {}: {}", client_id, e);
    }
    process_info!(ProcessId::current(), "👋 WebSocket connection closed: {}", client_id);
}

/// A client request that has been validated and, for change events, ticketed
#[derive(Debug, Clone)]
pub enum AcceptedRequest {
    Overview { ticket: u64, filter: FilterState },
    Map { ticket: u64, selection: MapSelection },
    GetLatest,
    Ping,
}

/// Validate a request and take its ticket
///
/// Must run before the request is handed to another task.
pub fn accept_request(state: &WebServerState, request: ClientRequest) -> WebServerResult<AcceptedRequest> {
    Ok(match request {
        ClientRequest::UpdateFilter { filter } => AcceptedRequest::Overview {
            ticket: state.issue_overview(&filter)?,
            filter,
        },
        ClientRequest::SelectMap { metric, color_scale } => AcceptedRequest::Map {
            ticket: state.issue_map(),
            selection: MapSelection::new(metric, color_scale),
        },
        ClientRequest::GetLatest => AcceptedRequest::GetLatest,
        ClientRequest::Ping => AcceptedRequest::Ping,
    })
}

/// Finish an accepted request
///
/// Published results reach every client through the publication forwarder,
/// so change events only need to be computed here.
pub async fn complete_request<W>(
    client_id: Uuid,
    accepted: AcceptedRequest,
    server: &WebServer<W>,
) -> WebServerResult<()>
where
    W: WebSocketManager,
{
    let state = server.state();
    let manager = server.websocket_manager();
    match accepted {
        AcceptedRequest::Overview { ticket, filter } => {
            state.compute_overview(ticket, filter).await?;
        }
        AcceptedRequest::Map { ticket, selection } => {
            state.compute_map(ticket, selection).await?;
        }
        AcceptedRequest::GetLatest => {
            if let Some(published) = state.overview.latest() {
                manager
                    .send_to_client(
                        client_id,
                        ClientMessage::OverviewUpdate {
                            ticket: published.ticket,
                            view: published.value.clone(),
                        },
                    )
                    .await?;
            }
            if let Some(published) = state.map.latest() {
                manager
                    .send_to_client(
                        client_id,
                        ClientMessage::MapUpdate {
                            ticket: published.ticket,
                            view: published.value.clone(),
                        },
                    )
                    .await?;
            }
        }
        AcceptedRequest::Ping => {
            process_debug!(ProcessId::current(), "Client {} sent ping", client_id);
            manager
                .send_to_client(
                    client_id,
                    ClientMessage::Pong {
                        server_time: Utc::now().timestamp() as u64,
                    },
                )
                .await?;
        }
    }
    Ok(())
}

/// Accept a request now and finish it on its own task
///
/// Overlapping change events then resolve last-write-wins by arrival order.
pub fn spawn_client_request<W>(
    client_id: Uuid,
    request: ClientRequest,
    server: &WebServer<W>,
) -> WebServerResult<JoinHandle<()>>
where
    W: WebSocketManager + Clone + 'static,
{
    let accepted = accept_request(server.state(), request)?;
    let server = server.clone();
    Ok(tokio::spawn(async move {
        if let Err(e) = complete_request(client_id, accepted, &server).await {
            report_error(&server, client_id, &e).await;
        }
    }))
}

async fn report_error<W>(server: &WebServer<W>, client_id: Uuid, error: &WebServerError)
where
    W: WebSocketManager,
{
    logging::log_error(ProcessId::current(), "Client request", error);
    let message = ClientMessage::Error {
        message: error.to_string(),
    };
    let _ = server.websocket_manager().send_to_client(client_id, message).await;
}
