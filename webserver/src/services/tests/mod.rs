//! Service tests for webserver

pub mod helpers;
pub mod websocket_manager;
