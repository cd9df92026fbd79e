//! Per-show seat inventory
//!
//! Each show owns its seat map behind its own reader-writer lock, so
//! contention is bounded to clients targeting the same show. Reservations
//! are all-or-nothing: either every requested seat is marked taken inside
//! one critical section, or the seat map is left untouched.

use tokio::sync::RwLock;

/// Seat count used when a show is created without an explicit capacity
pub const DEFAULT_SEAT_COUNT: usize = 20;

/// One bookable show: a movie/theater/time combination with a fixed-length
/// seat map
///
/// Seat number `i` maps to index `i - 1`; `false` = available, `true` =
/// reserved. The seat map length never changes after construction, and a
/// reserved seat never becomes available again (there is no cancellation).
pub struct Show {
    /// Movie title
    pub movie: String,

    /// Show date and time
    pub date_time: String,

    /// Theater name
    pub theater: String,

    seat_count: usize,
    seats: RwLock<Vec<bool>>,
}

/// Point-in-time availability view of one show, consumed by formatters
#[derive(Debug, Clone)]
pub struct ShowAvailability {
    /// Movie title
    pub movie: String,
    /// Show date and time
    pub date_time: String,
    /// Theater name
    pub theater: String,
    /// Available seat numbers, ascending
    pub available: Vec<u8>,
    /// Total seats in the show
    pub seat_count: usize,
}

impl Show {
    /// Create a show with the default seat count, all seats available
    pub fn new(
        movie: impl Into<String>,
        date_time: impl Into<String>,
        theater: impl Into<String>,
    ) -> Self {
        Self::with_seats(movie, date_time, theater, DEFAULT_SEAT_COUNT)
    }

    /// Create a show with a custom seat count, all seats available
    pub fn with_seats(
        movie: impl Into<String>,
        date_time: impl Into<String>,
        theater: impl Into<String>,
        seat_count: usize,
    ) -> Self {
        Self {
            movie: movie.into(),
            date_time: date_time.into(),
            theater: theater.into(),
            seat_count,
            seats: RwLock::new(vec![false; seat_count]),
        }
    }

    /// Create a show with a seeded occupancy pattern (`true` = reserved)
    pub fn with_occupancy(
        movie: impl Into<String>,
        date_time: impl Into<String>,
        theater: impl Into<String>,
        seats: Vec<bool>,
    ) -> Self {
        Self {
            movie: movie.into(),
            date_time: date_time.into(),
            theater: theater.into(),
            seat_count: seats.len(),
            seats: RwLock::new(seats),
        }
    }

    /// Total number of seats in this show
    pub fn seat_count(&self) -> usize {
        self.seat_count
    }

    /// Exact-match test on both identity fields
    pub fn matches(&self, theater: &str, movie: &str) -> bool {
        self.theater == theater && self.movie == movie
    }

    /// Currently available seat numbers, ascending
    ///
    /// Takes a shared lock; concurrent calls proceed in parallel and block
    /// only against an in-flight reservation on this show.
    pub async fn available_seats(&self) -> Vec<u8> {
        let seats = self.seats.read().await;
        seats
            .iter()
            .enumerate()
            .filter(|(_, taken)| !**taken)
            .map(|(i, _)| (i + 1) as u8)
            .collect()
    }

    /// Atomically reserve every listed seat
    ///
    /// Takes the exclusive lock on this show only. Returns `false` without
    /// modifying any seat if any number is out of range `[1, N]` or already
    /// reserved; duplicates within one request are idempotent.
    pub async fn reserve(&self, seat_numbers: &[u8]) -> bool {
        let mut seats = self.seats.write().await;

        for &seat in seat_numbers {
            let n = seat as usize;
            if n < 1 || n > seats.len() || seats[n - 1] {
                return false;
            }
        }
        for &seat in seat_numbers {
            seats[seat as usize - 1] = true;
        }
        true
    }

    /// Point-in-time availability view for snapshot rendering
    pub async fn availability(&self) -> ShowAvailability {
        ShowAvailability {
            movie: self.movie.clone(),
            date_time: self.date_time.clone(),
            theater: self.theater.clone(),
            available: self.available_seats().await,
            seat_count: self.seat_count,
        }
    }
}
