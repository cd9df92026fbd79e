//! Booking coordination
//!
//! The coordinator resolves a parsed booking request to a target show,
//! validates every seat token before any inventory is touched, and makes
//! exactly one reservation attempt per request (it never retries). It also
//! assembles the reply frame for every inbound frame kind, since each
//! reply embeds a current catalog snapshot.

pub mod error;

use std::sync::Arc;

use crate::catalog::{Catalog, SnapshotFormatter};
use crate::protocol::{BookingRequest, InboundFrame};

pub use error::BookingError;

/// Outcome of a successful reservation
///
/// Identifies the affected show (used by the caller to drive a broadcast)
/// and lists the newly reserved seats for the confirmation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationReceipt {
    /// Theater of the affected show
    pub theater: String,
    /// Movie of the affected show
    pub movie: String,
    /// Seats reserved by this request, in request order
    pub seats: Vec<u8>,
}

/// A direct reply to one inbound frame
#[derive(Debug, Clone)]
pub struct Reply {
    /// Reply frame text, transmitted verbatim
    pub text: String,
    /// Whether the request mutated an inventory and a broadcast is due
    pub broadcast: bool,
}

/// Resolves and executes booking requests against the catalog
pub struct BookingCoordinator {
    catalog: Arc<Catalog>,
}

impl BookingCoordinator {
    /// Create a coordinator over the given catalog
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// The catalog this coordinator serves
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Validate a booking request and attempt the reservation
    ///
    /// Seat tokens are validated up front; a single bad token anywhere in
    /// the list aborts the whole request before any inventory is consulted.
    /// Exactly one reservation attempt is made, all-or-nothing.
    pub async fn reserve(
        &self,
        request: &BookingRequest,
    ) -> Result<ReservationReceipt, BookingError> {
        let seat_count = self.catalog.seat_count();

        let mut seats = Vec::with_capacity(request.seat_tokens.len());
        for token in &request.seat_tokens {
            match token.parse::<i64>() {
                Ok(n) if n >= 1 && n <= seat_count as i64 => seats.push(n as u8),
                Ok(_) => {
                    return Err(BookingError::SeatOutOfRange {
                        token: token.clone(),
                        seat_count,
                    })
                }
                Err(_) => return Err(BookingError::InvalidSeatToken(token.clone())),
            }
        }

        let show = self
            .catalog
            .find(&request.theater, &request.movie)
            .ok_or_else(|| BookingError::ShowNotFound {
                theater: request.theater.clone(),
                movie: request.movie.clone(),
            })?;

        if show.reserve(&seats).await {
            Ok(ReservationReceipt {
                theater: show.theater.clone(),
                movie: show.movie.clone(),
                seats,
            })
        } else {
            Err(BookingError::SeatsUnavailable)
        }
    }

    /// Handle one inbound text frame and produce its direct reply
    pub async fn handle<F: SnapshotFormatter>(&self, raw: &str, formatter: &F) -> Reply {
        match InboundFrame::parse(raw) {
            InboundFrame::Refresh => Reply {
                text: self.render_catalog(formatter).await,
                broadcast: false,
            },
            InboundFrame::Booking(request) => match self.reserve(&request).await {
                Ok(receipt) => Reply {
                    text: format!(
                        "SUCCESS: Booked seats {} for {} at {}\n\n{}",
                        join_seats(&receipt.seats),
                        receipt.movie,
                        receipt.theater,
                        self.render_catalog(formatter).await
                    ),
                    broadcast: true,
                },
                Err(err) => Reply {
                    text: format!("{}\n\n{}", err, self.render_catalog(formatter).await),
                    broadcast: false,
                },
            },
            InboundFrame::Malformed(_) => Reply {
                text: format!(
                    "{}\n\n{}",
                    BookingError::MalformedRequest,
                    self.render_catalog(formatter).await
                ),
                broadcast: false,
            },
            InboundFrame::Other(text) => Reply {
                text: format!("Echo: {}\n\n{}", text, self.render_catalog(formatter).await),
                broadcast: false,
            },
        }
    }

    /// Render the full catalog snapshot (connect frames and direct replies)
    pub async fn render_catalog<F: SnapshotFormatter>(&self, formatter: &F) -> String {
        formatter.render_catalog(&self.catalog.availability().await)
    }

    /// Render the update snapshot (broadcast after a successful reservation)
    pub async fn render_update<F: SnapshotFormatter>(&self, formatter: &F) -> String {
        formatter.render_update(&self.catalog.availability().await)
    }
}

fn join_seats(seats: &[u8]) -> String {
    let mut out = String::new();
    for (i, seat) in seats.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&seat.to_string());
    }
    out
}
