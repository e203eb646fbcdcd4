//! REST API handlers
//!
//! HTTP endpoints for page routing, control data and view recomputation

use axum::{
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde_json::{Value, json};

use engine::Outcome;
use shared::{ColorScale, Controls, FilterState, MapMetric, MapSelection, MapViewSet, Page, ViewSet};

use crate::error::WebServerResult;
use crate::traits::WebSocketManager;
use crate::types::{MapQuery, PageQuery, PageResponse};
use crate::webserver_impl::WebServer;

/// Health check endpoint
pub async fn health<W>(State(server): State<WebServer<W>>) -> Json<Value>
where
    W: WebSocketManager + Clone + 'static,
{
    let state = server.state();
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().timestamp(),
        "uptime": state.get_uptime_seconds(),
        "records": state.engine.dataset().len(),
        "connections": server.websocket_manager().client_count().await,
    }))
}

/// Resolve which page a path renders
pub async fn page(Query(query): Query<PageQuery>) -> Json<PageResponse> {
    let path = query.path.unwrap_or_else(|| "/".to_string());
    let page = Page::from_path(&path);
    Json(PageResponse { path, page })
}

/// Dropdown, slider and default values for both pages
pub async fn controls<W>(State(server): State<WebServer<W>>) -> Json<Controls>
where
    W: WebSocketManager + Clone + 'static,
{
    Json(server.state().engine.controls())
}

/// Latest published overview
pub async fn get_overview<W>(State(server): State<WebServer<W>>) -> WebServerResult<Json<ViewSet>>
where
    W: WebSocketManager + Clone + 'static,
{
    let published = server.state().current_overview()?;
    Ok(Json(published.value.clone()))
}

/// Filter change event
pub async fn post_overview<W>(
    State(server): State<WebServer<W>>,
    payload: Result<Json<FilterState>, JsonRejection>,
) -> WebServerResult<Response>
where
    W: WebSocketManager + Clone + 'static,
{
    let Json(filter) = payload?;
    let outcome = server.state().submit_overview(filter).await?;
    Ok(outcome_response(outcome))
}

/// Map metric / colour-scale change event
pub async fn get_map<W>(
    State(server): State<WebServer<W>>,
    Query(query): Query<MapQuery>,
) -> WebServerResult<Response>
where
    W: WebSocketManager + Clone + 'static,
{
    let selection = map_selection(&query)?;
    let outcome: Outcome<MapViewSet> = server.state().submit_map(selection).await?;
    Ok(outcome_response(outcome))
}

fn map_selection(query: &MapQuery) -> WebServerResult<MapSelection> {
    let metric = match query.metric.as_deref() {
        Some(raw) => raw.parse::<MapMetric>()?,
        None => MapMetric::default(),
    };
    let color_scale = match query.color_scale.as_deref() {
        Some(raw) => raw.parse::<ColorScale>()?,
        None => ColorScale::default(),
    };
    Ok(MapSelection::new(metric, color_scale))
}

fn outcome_response<T: serde::Serialize>(outcome: Outcome<T>) -> Response {
    match outcome {
        Outcome::Published(view) => Json(view).into_response(),
        Outcome::Superseded { ticket, latest } => (
            StatusCode::CONFLICT,
            Json(json!({
                "status": "superseded",
                "ticket": ticket,
                "latest": latest,
            })),
        )
            .into_response(),
    }
}
