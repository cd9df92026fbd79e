//! Show catalog
//!
//! Immutable-after-construction collection of shows. The catalog itself
//! needs no lock: shows are never added or removed while serving, and each
//! show synchronizes its own seat map internally.

use super::show::{Show, ShowAvailability, DEFAULT_SEAT_COUNT};

/// All shows known to the server
pub struct Catalog {
    shows: Vec<Show>,
    seat_count: usize,
}

impl Catalog {
    /// Start building a catalog
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// All shows, in insertion order
    pub fn shows(&self) -> &[Show] {
        &self.shows
    }

    /// Seat count shared by every show in this catalog
    pub fn seat_count(&self) -> usize {
        self.seat_count
    }

    /// Look up a show by exact match on both identity fields
    pub fn find(&self, theater: &str, movie: &str) -> Option<&Show> {
        self.shows.iter().find(|s| s.matches(theater, movie))
    }

    /// Point-in-time availability view of every show, for snapshot rendering
    pub async fn availability(&self) -> Vec<ShowAvailability> {
        let mut views = Vec::with_capacity(self.shows.len());
        for show in &self.shows {
            views.push(show.availability().await);
        }
        views
    }
}

/// Builder for [`Catalog`]
pub struct CatalogBuilder {
    seat_count: usize,
    shows: Vec<Show>,
}

impl CatalogBuilder {
    /// Create a builder with the default seat count
    pub fn new() -> Self {
        Self {
            seat_count: DEFAULT_SEAT_COUNT,
            shows: Vec::new(),
        }
    }

    /// Set the seat count for shows added after this call
    pub fn seat_count(mut self, seat_count: usize) -> Self {
        self.seat_count = seat_count;
        self
    }

    /// Add a show with every seat available
    pub fn show(
        mut self,
        movie: impl Into<String>,
        date_time: impl Into<String>,
        theater: impl Into<String>,
    ) -> Self {
        self.shows
            .push(Show::with_seats(movie, date_time, theater, self.seat_count));
        self
    }

    /// Add a show with a seeded occupancy pattern (`true` = reserved)
    ///
    /// The pattern length must match the builder's seat count.
    pub fn show_with_occupancy(
        mut self,
        movie: impl Into<String>,
        date_time: impl Into<String>,
        theater: impl Into<String>,
        occupancy: Vec<bool>,
    ) -> Self {
        assert_eq!(
            occupancy.len(),
            self.seat_count,
            "occupancy pattern length must match the catalog seat count"
        );
        self.shows
            .push(Show::with_occupancy(movie, date_time, theater, occupancy));
        self
    }

    /// Finish the catalog
    pub fn build(self) -> Catalog {
        Catalog {
            shows: self.shows,
            seat_count: self.seat_count,
        }
    }
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_is_exact_match() {
        let catalog = Catalog::builder()
            .show("Inception", "2025-09-11 19:30", "PVR")
            .show("Inception", "2025-09-11 19:30", "IMAX")
            .show("Tenet", "2025-09-11 19:30", "PVR")
            .build();

        assert!(catalog.find("PVR", "Inception").is_some());
        assert!(catalog.find("IMAX", "Tenet").is_none());
        // Both fields must match exactly, including case
        assert!(catalog.find("pvr", "Inception").is_none());
        assert!(catalog.find("PVR", "inception").is_none());
    }

    #[tokio::test]
    async fn test_availability_covers_all_shows() {
        let catalog = Catalog::builder()
            .seat_count(4)
            .show("Inception", "2025-09-11 19:30", "PVR")
            .show_with_occupancy(
                "Tenet",
                "2025-09-11 19:30",
                "IMAX",
                vec![true, true, false, false],
            )
            .build();

        let views = catalog.availability().await;
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].available, vec![1, 2, 3, 4]);
        assert_eq!(views[1].available, vec![3, 4]);
    }
}
