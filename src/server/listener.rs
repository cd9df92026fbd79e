//! Booking server listener
//!
//! Handles the TCP accept loop and spawns one connection driver per
//! client. Accept and per-connection errors are logged, never fatal.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;

use crate::booking::BookingCoordinator;
use crate::catalog::{Catalog, SnapshotFormatter};
use crate::error::Result;
use crate::registry::SessionRegistry;
use crate::server::config::ServerConfig;
use crate::session::Connection;

/// Cinema booking server
pub struct CinemaServer<F: SnapshotFormatter> {
    config: ServerConfig,
    coordinator: Arc<BookingCoordinator>,
    formatter: Arc<F>,
    registry: Arc<SessionRegistry>,
    next_session_id: AtomicU64,
    connection_semaphore: Option<Arc<Semaphore>>,
}

impl<F: SnapshotFormatter> CinemaServer<F> {
    /// Create a new server over the given catalog and formatter
    pub fn new(config: ServerConfig, catalog: Arc<Catalog>, formatter: F) -> Self {
        let connection_semaphore = if config.max_connections > 0 {
            Some(Arc::new(Semaphore::new(config.max_connections)))
        } else {
            None
        };

        Self {
            config,
            coordinator: Arc::new(BookingCoordinator::new(catalog)),
            formatter: Arc::new(formatter),
            registry: Arc::new(SessionRegistry::new()),
            next_session_id: AtomicU64::new(1),
            connection_semaphore,
        }
    }

    /// Get a reference to the session registry
    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// The catalog this server serves
    pub fn catalog(&self) -> &Arc<Catalog> {
        self.coordinator.catalog()
    }

    /// Run the server
    ///
    /// This method blocks until the server is shut down.
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "Booking server listening");

        self.serve(listener).await
    }

    /// Run the server with graceful shutdown
    pub async fn run_until<Fut>(&self, shutdown: Fut) -> Result<()>
    where
        Fut: std::future::Future<Output = ()>,
    {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "Booking server listening");

        tokio::select! {
            _ = shutdown => {
                tracing::info!("Shutdown signal received");
                Ok(())
            }
            result = self.serve(listener) => result,
        }
    }

    /// Serve connections on an already-bound listener
    ///
    /// Useful when the caller needs the listener's local address first
    /// (e.g. binding to port 0).
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        loop {
            match listener.accept().await {
                Ok((socket, peer_addr)) => {
                    self.handle_connection(socket, peer_addr);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }

    fn handle_connection(&self, socket: TcpStream, peer_addr: SocketAddr) {
        // Check connection limit; the permit lives as long as the session
        let permit = if let Some(ref sem) = self.connection_semaphore {
            match sem.clone().try_acquire_owned() {
                Ok(permit) => Some(permit),
                Err(_) => {
                    tracing::warn!(peer = %peer_addr, "Connection rejected: limit reached");
                    return;
                }
            }
        } else {
            None
        };

        let session_id = self.next_session_id.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(
            session_id = session_id,
            peer = %peer_addr,
            "New connection"
        );

        if self.config.tcp_nodelay {
            if let Err(e) = socket.set_nodelay(true) {
                tracing::error!(error = %e, "Failed to configure socket");
                return;
            }
        }

        let connection = Connection::new(
            session_id,
            peer_addr,
            self.config.clone(),
            Arc::clone(&self.coordinator),
            Arc::clone(&self.formatter),
            Arc::clone(&self.registry),
        );

        tokio::spawn(async move {
            let _permit = permit;

            if let Err(e) = connection.run(socket).await {
                tracing::debug!(
                    session_id = session_id,
                    error = %e,
                    "Connection error"
                );
            }

            tracing::debug!(session_id = session_id, "Connection closed");
        });
    }

    /// Get the configured bind address
    pub fn bind_addr(&self) -> SocketAddr {
        self.config.bind_addr
    }
}
