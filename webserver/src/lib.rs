//! Webserver for the crime dashboard
//!
//! Serves page routing, control data and view payloads over HTTP, and pushes
//! every published overview and map result to browser clients over WebSocket.

pub mod error;
pub mod services;
pub mod state;
pub mod traits;
pub mod types;
pub mod web;
pub mod webserver_impl;

// Re-export main types
pub use error::{WebServerError, WebServerResult};
pub use state::WebServerState;
pub use webserver_impl::WebServer;

pub use services::RealWebSocketManager;
pub use traits::WebSocketManager;
