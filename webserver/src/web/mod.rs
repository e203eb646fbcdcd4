//! HTTP and WebSocket surface of the page controller

pub mod handlers;
