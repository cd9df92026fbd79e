//! Booking client demo
//!
//! Connects to a running `cinema_server`, prints every inbound frame, and
//! books a few seats. Usage:
//!
//! ```text
//! cargo run --example booking_client [theater] [movie] [seat...]
//! ```

use cinema_rs::client::{BookingClient, ClientEvent};

#[tokio::main]
async fn main() -> cinema_rs::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let theater = args.next().unwrap_or_else(|| "PVR".to_string());
    let movie = args.next().unwrap_or_else(|| "Inception".to_string());
    let seats: Vec<u8> = args.filter_map(|a| a.parse().ok()).collect();
    let seats = if seats.is_empty() { vec![3, 4] } else { seats };

    let (mut client, mut events) = BookingClient::connect("ws://localhost:8080").await?;

    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                ClientEvent::Frame(frame) => println!("{}", frame),
                ClientEvent::Disconnected => break,
            }
        }
    });

    client.book(&theater, &movie, &seats).await?;

    // Leave the connection open briefly to observe broadcasts from others
    tokio::time::sleep(std::time::Duration::from_secs(5)).await;

    client.close().await?;
    let _ = printer.await;
    Ok(())
}
