//! Type definitions for webserver
//!
//! Query strings accepted by the HTTP API and the JSON messages exchanged with
//! browser clients over the WebSocket.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::{ColorScale, FilterState, MapMetric, MapViewSet, Page, ViewSet};

/// `GET /api/page?path=..`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub path: Option<String>,
}

/// Resolved page for a path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse {
    pub path: String,
    pub page: Page,
}

/// `GET /api/map?metric=..&color_scale=..`; missing values use the map defaults
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MapQuery {
    pub metric: Option<String>,
    pub color_scale: Option<String>,
}

/// Messages pushed from the server to browser clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    ConnectionAck {
        session_id: Uuid,
        server_time: u64,
    },
    OverviewUpdate {
        ticket: u64,
        view: ViewSet,
    },
    MapUpdate {
        ticket: u64,
        view: MapViewSet,
    },
    /// A request from this client was rejected
    Error {
        message: String,
    },
    Pong {
        server_time: u64,
    },
}

/// Requests from browser clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientRequest {
    /// Overview filter changed
    UpdateFilter { filter: FilterState },
    /// Map dropdowns changed
    SelectMap {
        metric: MapMetric,
        color_scale: ColorScale,
    },
    /// Resend the latest published results to this client
    GetLatest,
    Ping,
}
