//! Tests for RealWebSocketManager

use uuid::Uuid;

use super::helpers::{client_channel, wait_for_condition};
use crate::services::RealWebSocketManager;
use crate::traits::WebSocketManager;
use crate::types::ClientMessage;

#[tokio::test]
async fn test_add_client_sends_ack() {
    let manager = RealWebSocketManager::new();
    let client_id = Uuid::new_v4();
    let (tx, mut rx) = client_channel();

    manager.add_client(client_id, tx).await.unwrap();

    assert_eq!(manager.client_count().await, 1);
    assert_eq!(manager.active_clients().await, vec![client_id]);
    match rx.recv().await {
        Some(ClientMessage::ConnectionAck { session_id, .. }) => assert_eq!(session_id, client_id),
        other => panic!("expected ack, got {other:?}"),
    }
}

#[tokio::test]
async fn test_broadcast_reaches_every_client() {
    let manager = RealWebSocketManager::new();
    let (tx1, mut rx1) = client_channel();
    let (tx2, mut rx2) = client_channel();
    manager.add_client(Uuid::new_v4(), tx1).await.unwrap();
    manager.add_client(Uuid::new_v4(), tx2).await.unwrap();

    // Drain the acks
    rx1.recv().await.unwrap();
    rx2.recv().await.unwrap();

    manager
        .broadcast(ClientMessage::Pong { server_time: 7 })
        .await
        .unwrap();

    assert!(matches!(rx1.recv().await, Some(ClientMessage::Pong { server_time: 7 })));
    assert!(matches!(rx2.recv().await, Some(ClientMessage::Pong { server_time: 7 })));
}

#[tokio::test]
async fn test_broadcast_drops_closed_clients() {
    let manager = RealWebSocketManager::new();
    let (tx, rx) = client_channel();
    manager.add_client(Uuid::new_v4(), tx).await.unwrap();
    drop(rx);

    manager
        .broadcast(ClientMessage::Pong { server_time: 1 })
        .await
        .unwrap();

    let manager_ref = &manager;
    assert!(wait_for_condition(|| async move { manager_ref.client_count().await == 0 }, 500).await);
}

#[tokio::test]
async fn test_send_to_unknown_client_fails() {
    let manager = RealWebSocketManager::new();
    let result = manager
        .send_to_client(Uuid::new_v4(), ClientMessage::Pong { server_time: 0 })
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_remove_client() {
    let manager = RealWebSocketManager::new();
    let client_id = Uuid::new_v4();
    let (tx, _rx) = client_channel();
    manager.add_client(client_id, tx).await.unwrap();

    manager.remove_client(client_id).await.unwrap();
    assert_eq!(manager.client_count().await, 0);
    assert!(manager.active_clients().await.is_empty());
}
