//! Service implementations
//!
//! Real implementations of the service traits for production use

pub mod websocket_manager;

#[cfg(test)]
mod tests;

pub use websocket_manager::RealWebSocketManager;
