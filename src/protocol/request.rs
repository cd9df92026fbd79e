//! Inbound request parsing
//!
//! The wire grammar, in matching order:
//! - literal `get_data` or `refresh` — snapshot request
//! - text containing `,` — booking request
//!   `<theater>,<movie>,<seat>,<seat>,...` (at least one seat field)
//! - anything else — unrecognized, echoed back

/// A parsed inbound frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    /// Snapshot request; no mutation
    Refresh,

    /// Booking request with all required fields present
    Booking(BookingRequest),

    /// Comma-separated text with fewer than the required fields
    Malformed(String),

    /// Unrecognized text; acknowledged, no mutation, no broadcast
    Other(String),
}

/// A booking request split into its raw fields
///
/// Seat tokens are kept as literal text; the coordinator validates them
/// before any inventory is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    /// Target theater name
    pub theater: String,
    /// Target movie title
    pub movie: String,
    /// Raw seat-number tokens, in request order
    pub seat_tokens: Vec<String>,
}

impl InboundFrame {
    /// Parse one frame of inbound text
    pub fn parse(text: &str) -> InboundFrame {
        if text == "get_data" || text == "refresh" {
            return InboundFrame::Refresh;
        }

        if text.contains(',') {
            let parts: Vec<&str> = text.split(',').collect();
            if parts.len() < 3 {
                return InboundFrame::Malformed(text.to_string());
            }
            return InboundFrame::Booking(BookingRequest {
                theater: parts[0].to_string(),
                movie: parts[1].to_string(),
                seat_tokens: parts[2..].iter().map(|s| s.to_string()).collect(),
            });
        }

        InboundFrame::Other(text.to_string())
    }
}
