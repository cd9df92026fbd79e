//! Per-connection driver
//!
//! Runs one client connection: WebSocket handshake, registry entry,
//! initial snapshot, then a read loop and a single-consumer writer task.
//! The writer task drains the session's outbound queue one message at a
//! time, which keeps per-session frame order and guarantees a single
//! in-flight write per connection.

use std::sync::Arc;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{accept_async, WebSocketStream};

use crate::booking::BookingCoordinator;
use crate::catalog::SnapshotFormatter;
use crate::error::{Error, Result};
use crate::registry::{SessionHandle, SessionRegistry};
use crate::server::ServerConfig;

use super::state::SessionState;

/// One client connection
pub struct Connection<F: SnapshotFormatter> {
    state: SessionState,
    config: ServerConfig,
    coordinator: Arc<BookingCoordinator>,
    formatter: Arc<F>,
    registry: Arc<SessionRegistry>,
}

impl<F: SnapshotFormatter> Connection<F> {
    /// Create a connection driver for a freshly accepted socket
    pub fn new(
        session_id: u64,
        peer_addr: std::net::SocketAddr,
        config: ServerConfig,
        coordinator: Arc<BookingCoordinator>,
        formatter: Arc<F>,
        registry: Arc<SessionRegistry>,
    ) -> Self {
        Self {
            state: SessionState::new(session_id, peer_addr),
            config,
            coordinator,
            formatter,
            registry,
        }
    }

    /// Drive the connection until teardown
    ///
    /// Any transport error ends this session only: the outbound queue is
    /// discarded, the registry entry is removed, and the error is returned
    /// for logging. Nothing escalates past this call.
    pub async fn run<S>(mut self, socket: S) -> Result<()>
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        let ws = tokio::time::timeout(self.config.connection_timeout, accept_async(socket))
            .await
            .map_err(|_| Error::HandshakeTimeout)??;
        self.state.accept();

        let (sink, stream) = ws.split();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let mut writer = tokio::spawn(write_loop(sink, outbound_rx));

        let handle = SessionHandle::new(self.state.id, outbound_tx);
        self.registry.insert(handle.clone()).await;

        let result = self.serve(stream, &handle, &mut writer).await;

        // Teardown: drop queued messages, remove the registry entry.
        // Removal is idempotent, so a concurrent writer failure is fine.
        self.state.close();
        self.registry.remove(self.state.id).await;
        writer.abort();
        self.state.finish();

        tracing::debug!(
            session_id = self.state.id,
            frames = self.state.frames_received,
            "Session closed"
        );
        result
    }

    async fn serve<S>(
        &mut self,
        mut stream: SplitStream<WebSocketStream<S>>,
        handle: &SessionHandle,
        writer: &mut JoinHandle<Result<()>>,
    ) -> Result<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        // The initial snapshot goes out before any inbound frame is read
        let initial = self.coordinator.render_catalog(self.formatter.as_ref()).await;
        if !handle.enqueue_text(initial) {
            return Err(Error::SessionClosed);
        }
        self.state.activate();

        let mut keepalive = tokio::time::interval(self.config.ping_interval);
        keepalive.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                inbound = stream.next() => match inbound {
                    Some(Ok(message)) => {
                        if !self.handle_message(message, handle).await? {
                            return Ok(());
                        }
                    }
                    Some(Err(e)) => return Err(Error::WebSocket(e)),
                    None => return Ok(()),
                },
                finished = &mut *writer => {
                    // The writer never exits while this loop holds the
                    // sender, so this is a write failure or an abort
                    return match finished {
                        Ok(Ok(())) | Err(_) => Err(Error::SessionClosed),
                        Ok(Err(e)) => Err(e),
                    };
                }
                _ = keepalive.tick() => {
                    if self.state.idle_for() > self.config.idle_timeout {
                        tracing::debug!(session_id = self.state.id, "Idle timeout");
                        return Ok(());
                    }
                    handle.enqueue(Message::Ping(Vec::new()));
                }
            }
        }
    }

    /// Process one inbound message; returns `false` on a close frame
    async fn handle_message(&mut self, message: Message, handle: &SessionHandle) -> Result<bool> {
        match message {
            Message::Text(text) => {
                self.state.on_frame();
                tracing::debug!(session_id = self.state.id, frame = %text, "Frame received");

                let reply = self.coordinator.handle(&text, self.formatter.as_ref()).await;
                let broadcast = reply.broadcast;

                if !handle.enqueue_text(reply.text) {
                    return Err(Error::SessionClosed);
                }

                // Fan out only after the direct reply is queued; every
                // live session gets the refreshed snapshot, including
                // this one
                if broadcast {
                    let update = self.coordinator.render_update(self.formatter.as_ref()).await;
                    self.registry.broadcast(&update).await;
                }
                Ok(true)
            }
            Message::Binary(payload) => {
                self.state.touch();
                tracing::debug!(
                    session_id = self.state.id,
                    len = payload.len(),
                    "Ignoring binary frame"
                );
                Ok(true)
            }
            Message::Ping(payload) => {
                self.state.touch();
                handle.enqueue(Message::Pong(payload));
                Ok(true)
            }
            Message::Pong(_) => {
                self.state.touch();
                Ok(true)
            }
            Message::Close(_) => Ok(false),
            Message::Frame(_) => Ok(true),
        }
    }
}

/// Drain the outbound queue, one fully flushed write at a time
async fn write_loop<S>(
    mut sink: SplitSink<WebSocketStream<S>, Message>,
    mut outbound: mpsc::UnboundedReceiver<Message>,
) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    while let Some(message) = outbound.recv().await {
        sink.send(message).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};

    use tokio_test::assert_ok;

    use crate::catalog::{Catalog, TextFormatter};

    use super::*;

    fn peer() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 9999)
    }

    fn spawn_connection(
        registry: Arc<SessionRegistry>,
    ) -> (tokio::io::DuplexStream, JoinHandle<Result<()>>) {
        let catalog = Catalog::builder()
            .show("Inception", "2025-09-11 19:30", "PVR")
            .build();
        let coordinator = Arc::new(BookingCoordinator::new(Arc::new(catalog)));

        let (client_io, server_io) = tokio::io::duplex(64 * 1024);
        let connection = Connection::new(
            1,
            peer(),
            ServerConfig::default(),
            coordinator,
            Arc::new(TextFormatter),
            registry,
        );
        let task = tokio::spawn(connection.run(server_io));
        (client_io, task)
    }

    async fn next_text(
        ws: &mut WebSocketStream<tokio::io::DuplexStream>,
    ) -> String {
        loop {
            match ws.next().await.expect("stream ended").expect("read failed") {
                Message::Text(text) => return text,
                _ => continue,
            }
        }
    }

    #[tokio::test]
    async fn test_initial_snapshot_then_reply() {
        let registry = Arc::new(SessionRegistry::new());
        let (client_io, task) = spawn_connection(Arc::clone(&registry));

        let (mut ws, _) = tokio_tungstenite::client_async("ws://localhost/", client_io)
            .await
            .unwrap();

        // Exactly one full snapshot before anything else
        let initial = next_text(&mut ws).await;
        assert!(initial.starts_with("=== CINEMA DATA STREAM ===\n"));
        assert_eq!(registry.session_count().await, 1);

        assert_ok!(ws.send(Message::text("PVR,Inception,1,2")).await);
        let reply = next_text(&mut ws).await;
        assert!(reply.starts_with("SUCCESS: Booked seats 1, 2 for Inception at PVR\n\n"));

        // The requester also receives the broadcast copy
        let update = next_text(&mut ws).await;
        assert!(update.starts_with("BOOKING_UPDATE:\n"));

        assert_ok!(ws.close(None).await);
        assert_ok!(task.await.unwrap());
        assert_eq!(registry.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_error_reply_without_broadcast() {
        let registry = Arc::new(SessionRegistry::new());
        let (client_io, task) = spawn_connection(Arc::clone(&registry));

        let (mut ws, _) = tokio_tungstenite::client_async("ws://localhost/", client_io)
            .await
            .unwrap();
        let _initial = next_text(&mut ws).await;

        assert_ok!(ws.send(Message::text("PVR,Inception,99")).await);
        let reply = next_text(&mut ws).await;
        assert!(reply.starts_with("ERROR: Invalid seat number 99. Must be 1-20.\n\n"));

        // No broadcast followed; the next frame is the reply to get_data
        assert_ok!(ws.send(Message::text("get_data")).await);
        let snapshot = next_text(&mut ws).await;
        assert!(snapshot.starts_with("=== CINEMA DATA STREAM ===\n"));

        assert_ok!(ws.close(None).await);
        assert_ok!(task.await.unwrap());
    }

    #[tokio::test]
    async fn test_abrupt_disconnect_removes_session() {
        let registry = Arc::new(SessionRegistry::new());
        let (client_io, task) = spawn_connection(Arc::clone(&registry));

        let (mut ws, _) = tokio_tungstenite::client_async("ws://localhost/", client_io)
            .await
            .unwrap();
        let _initial = next_text(&mut ws).await;
        assert_eq!(registry.session_count().await, 1);

        // Drop the transport without a close handshake
        drop(ws);

        let result = task.await.unwrap();
        assert!(result.is_err());
        assert_eq!(registry.session_count().await, 0);
    }
}
