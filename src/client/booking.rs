//! Booking client
//!
//! High-level API for connecting to a booking server, issuing requests
//! and observing snapshot frames (including broadcasts triggered by other
//! clients).

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::error::Result;

/// Events from the booking client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// One inbound text frame: the initial snapshot, a direct reply or a
    /// broadcast update
    Frame(String),

    /// The connection ended
    Disconnected,
}

/// WebSocket booking client
///
/// # Example
/// ```no_run
/// use cinema_rs::client::{BookingClient, ClientEvent};
///
/// # async fn example() -> cinema_rs::Result<()> {
/// let (mut client, mut events) = BookingClient::connect("ws://localhost:8080").await?;
///
/// // Spawn event handler
/// tokio::spawn(async move {
///     while let Some(event) = events.recv().await {
///         if let ClientEvent::Frame(frame) = event {
///             println!("{}", frame);
///         }
///     }
/// });
///
/// client.book("PVR", "Inception", &[1, 2, 3]).await?;
/// # Ok(())
/// # }
/// ```
pub struct BookingClient {
    sink: SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>,
}

impl BookingClient {
    /// Connect to a booking server
    ///
    /// Returns the client and a receiver for inbound frames. The server
    /// sends one full snapshot immediately after the connection opens.
    pub async fn connect(url: &str) -> Result<(Self, mpsc::Receiver<ClientEvent>)> {
        let (ws, _response) = connect_async(url).await?;
        let (sink, mut stream) = ws.split();
        let (event_tx, event_rx) = mpsc::channel(256);

        tokio::spawn(async move {
            while let Some(inbound) = stream.next().await {
                match inbound {
                    Ok(Message::Text(text)) => {
                        if event_tx.send(ClientEvent::Frame(text)).await.is_err() {
                            return;
                        }
                    }
                    Ok(Message::Close(_)) | Err(_) => break,
                    Ok(_) => {}
                }
            }
            let _ = event_tx.send(ClientEvent::Disconnected).await;
        });

        Ok((Self { sink }, event_rx))
    }

    /// Request a fresh full snapshot
    pub async fn request_snapshot(&mut self) -> Result<()> {
        self.send_raw("get_data").await
    }

    /// Book seats for a show
    ///
    /// The direct confirmation (or error) arrives as a [`ClientEvent::Frame`];
    /// on success every connected client additionally receives a broadcast
    /// update.
    pub async fn book(&mut self, theater: &str, movie: &str, seats: &[u8]) -> Result<()> {
        let mut frame = format!("{},{}", theater, movie);
        for seat in seats {
            frame.push(',');
            frame.push_str(&seat.to_string());
        }
        self.send_raw(&frame).await
    }

    /// Send one raw text frame
    pub async fn send_raw(&mut self, text: &str) -> Result<()> {
        self.sink.send(Message::text(text)).await?;
        Ok(())
    }

    /// Close the connection
    pub async fn close(&mut self) -> Result<()> {
        self.sink.send(Message::Close(None)).await?;
        Ok(())
    }
}
