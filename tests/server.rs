//! End-to-end tests over real connections
//!
//! Each test binds a server to an ephemeral port and drives it with real
//! WebSocket clients.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use cinema_rs::catalog::{Catalog, TextFormatter};
use cinema_rs::client::{BookingClient, ClientEvent};
use cinema_rs::server::{CinemaServer, ServerConfig};

async fn start_server() -> (String, JoinHandle<()>) {
    let catalog = Arc::new(
        Catalog::builder()
            .show("Inception", "2025-09-11 19:30", "PVR")
            .show("Tenet", "2025-09-11 19:30", "IMAX")
            .build(),
    );

    let server = CinemaServer::new(ServerConfig::default(), catalog, TextFormatter);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let task = tokio::spawn(async move {
        let _ = server.serve(listener).await;
    });

    (format!("ws://{}/", addr), task)
}

async fn next_frame(events: &mut mpsc::Receiver<ClientEvent>) -> String {
    match tokio::time::timeout(Duration::from_secs(5), events.recv()).await {
        Ok(Some(ClientEvent::Frame(frame))) => frame,
        other => panic!("expected a frame, got {:?}", other),
    }
}

/// Assert that no frame arrives within a short grace period
async fn assert_silent(events: &mut mpsc::Receiver<ClientEvent>) {
    let outcome = tokio::time::timeout(Duration::from_millis(300), events.recv()).await;
    assert!(outcome.is_err(), "unexpected frame: {:?}", outcome);
}

#[tokio::test]
async fn test_snapshot_sent_on_connect() {
    let (url, server) = start_server().await;

    let (mut client, mut events) = BookingClient::connect(&url).await.unwrap();

    let initial = next_frame(&mut events).await;
    assert!(initial.starts_with("=== CINEMA DATA STREAM ===\n"));
    assert!(initial.contains("Theater: PVR\n"));
    assert!(initial.contains("Theater: IMAX\n"));

    client.close().await.unwrap();
    server.abort();
}

#[tokio::test]
async fn test_booking_fans_out_to_every_session() {
    let (url, server) = start_server().await;

    let (mut a, mut events_a) = BookingClient::connect(&url).await.unwrap();
    let (_b, mut events_b) = BookingClient::connect(&url).await.unwrap();
    let (_c, mut events_c) = BookingClient::connect(&url).await.unwrap();

    for events in [&mut events_a, &mut events_b, &mut events_c] {
        let initial = next_frame(events).await;
        assert!(initial.starts_with("=== CINEMA DATA STREAM ===\n"));
    }

    a.book("PVR", "Inception", &[1, 2, 3]).await.unwrap();

    // The requester receives both the direct reply and the broadcast
    let reply = next_frame(&mut events_a).await;
    assert!(reply.starts_with("SUCCESS: Booked seats 1, 2, 3 for Inception at PVR\n\n"));
    let update = next_frame(&mut events_a).await;
    assert!(update.starts_with("BOOKING_UPDATE:\n=== UPDATED CINEMA DATA ===\n"));

    // Every other session receives exactly one broadcast frame
    for events in [&mut events_b, &mut events_c] {
        let update = next_frame(events).await;
        assert!(update.starts_with("BOOKING_UPDATE:\n=== UPDATED CINEMA DATA ===\n"));
        // Inception now starts at seat 4
        assert!(update.contains("    Available seats: 4, 5"));
        assert_silent(events).await;
    }

    server.abort();
}

#[tokio::test]
async fn test_malformed_request_stays_local() {
    let (url, server) = start_server().await;

    let (mut a, mut events_a) = BookingClient::connect(&url).await.unwrap();
    let (_b, mut events_b) = BookingClient::connect(&url).await.unwrap();

    let _ = next_frame(&mut events_a).await;
    let _ = next_frame(&mut events_b).await;

    a.send_raw("PVR,Inception").await.unwrap();
    let reply = next_frame(&mut events_a).await;
    assert!(reply
        .starts_with("ERROR: Invalid booking format. Use: theater,movie,seat1,seat2,...\n\n"));

    // No other connected session receives any frame
    assert_silent(&mut events_b).await;

    server.abort();
}

#[tokio::test]
async fn test_unrecognized_request_is_echoed_locally() {
    let (url, server) = start_server().await;

    let (mut a, mut events_a) = BookingClient::connect(&url).await.unwrap();
    let (_b, mut events_b) = BookingClient::connect(&url).await.unwrap();

    let _ = next_frame(&mut events_a).await;
    let _ = next_frame(&mut events_b).await;

    a.send_raw("OnlyOneField").await.unwrap();
    let reply = next_frame(&mut events_a).await;
    assert!(reply.starts_with("Echo: OnlyOneField\n\n=== CINEMA DATA STREAM ===\n"));

    assert_silent(&mut events_b).await;

    server.abort();
}

#[tokio::test]
async fn test_conflicting_booking_gets_error_without_broadcast() {
    let (url, server) = start_server().await;

    let (mut a, mut events_a) = BookingClient::connect(&url).await.unwrap();
    let (mut b, mut events_b) = BookingClient::connect(&url).await.unwrap();

    let _ = next_frame(&mut events_a).await;
    let _ = next_frame(&mut events_b).await;

    a.book("IMAX", "Tenet", &[5]).await.unwrap();
    let _reply = next_frame(&mut events_a).await;
    let _update_a = next_frame(&mut events_a).await;
    let _update_b = next_frame(&mut events_b).await;

    b.book("IMAX", "Tenet", &[5]).await.unwrap();
    let reply = next_frame(&mut events_b).await;
    assert!(reply.starts_with("ERROR: One or more seats are already booked or invalid\n\n"));
    // Seat 5 stays reserved in the embedded snapshot
    assert!(!reply.contains("Available seats: 5"));

    // The failed attempt triggers no fan-out
    assert_silent(&mut events_a).await;
    assert_silent(&mut events_b).await;

    server.abort();
}

#[tokio::test]
async fn test_disconnect_does_not_perturb_other_sessions() {
    let (url, server) = start_server().await;

    let (mut a, mut events_a) = BookingClient::connect(&url).await.unwrap();
    let (b, mut events_b) = BookingClient::connect(&url).await.unwrap();

    let _ = next_frame(&mut events_a).await;
    let _ = next_frame(&mut events_b).await;

    // B vanishes without a close handshake
    drop(b);
    drop(events_b);
    tokio::time::sleep(Duration::from_millis(100)).await;

    // A is unaffected and still gets its reply and broadcast
    a.book("PVR", "Inception", &[10]).await.unwrap();
    let reply = next_frame(&mut events_a).await;
    assert!(reply.starts_with("SUCCESS: Booked seats 10 for Inception at PVR\n\n"));
    let update = next_frame(&mut events_a).await;
    assert!(update.starts_with("BOOKING_UPDATE:\n"));

    server.abort();
}

#[tokio::test]
async fn test_refresh_returns_current_state() {
    let (url, server) = start_server().await;

    let (mut client, mut events) = BookingClient::connect(&url).await.unwrap();
    let _ = next_frame(&mut events).await;

    client.book("PVR", "Inception", &[1]).await.unwrap();
    let _reply = next_frame(&mut events).await;
    let _update = next_frame(&mut events).await;

    client.request_snapshot().await.unwrap();
    let snapshot = next_frame(&mut events).await;
    assert!(snapshot.starts_with("=== CINEMA DATA STREAM ===\n"));
    assert!(snapshot.contains("Available seats: 2, 3"));
    assert!(snapshot.contains("(Total: 19/20)"));

    server.abort();
}
