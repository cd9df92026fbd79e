//! Booking error types
//!
//! Every variant is a request-local failure: the reply goes back to the
//! requesting client, no inventory is modified, no broadcast is sent, and
//! the connection stays open. The `Display` texts are the wire-format
//! error lines clients parse.

/// Error type for booking operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Fewer than the minimum comma-separated fields
    MalformedRequest,
    /// A seat token is not a decimal integer
    InvalidSeatToken(String),
    /// A seat token parsed but lies outside `[1, N]`
    SeatOutOfRange {
        /// The offending token, verbatim
        token: String,
        /// Upper bound of the valid range
        seat_count: usize,
    },
    /// At least one requested seat is already reserved
    SeatsUnavailable,
    /// No show matches the target theater/movie pair
    ShowNotFound {
        /// Requested theater name
        theater: String,
        /// Requested movie title
        movie: String,
    },
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingError::MalformedRequest => {
                write!(
                    f,
                    "ERROR: Invalid booking format. Use: theater,movie,seat1,seat2,..."
                )
            }
            BookingError::InvalidSeatToken(token) => {
                write!(f, "ERROR: Invalid seat number format: {}", token)
            }
            BookingError::SeatOutOfRange { token, seat_count } => {
                write!(
                    f,
                    "ERROR: Invalid seat number {}. Must be 1-{}.",
                    token, seat_count
                )
            }
            BookingError::SeatsUnavailable => {
                write!(f, "ERROR: One or more seats are already booked or invalid")
            }
            BookingError::ShowNotFound { theater, movie } => {
                write!(f, "ERROR: Show not found - {} at {}", movie, theater)
            }
        }
    }
}

impl std::error::Error for BookingError {}
