//! Snapshot rendering
//!
//! The exact textual rendering of a snapshot is a wire-compatibility
//! concern, kept behind the [`SnapshotFormatter`] seam so the server core
//! only ever asks for "a snapshot frame" and transmits the output verbatim.
//! [`TextFormatter`] is the production implementation.

use super::show::ShowAvailability;

/// Renders availability views into snapshot frames
pub trait SnapshotFormatter: Send + Sync + 'static {
    /// Render the full catalog snapshot sent on connect and in direct replies
    fn render_catalog(&self, shows: &[ShowAvailability]) -> String;

    /// Render the update snapshot broadcast after a successful reservation
    fn render_update(&self, shows: &[ShowAvailability]) -> String;
}

/// Human-readable text snapshot format
///
/// Groups shows by theater (first-seen order) and lists each show's
/// available seat numbers with a running total.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFormatter;

impl TextFormatter {
    fn render_body(shows: &[ShowAvailability], out: &mut String) {
        let mut theaters: Vec<&str> = Vec::new();
        for show in shows {
            if !theaters.contains(&show.theater.as_str()) {
                theaters.push(&show.theater);
            }
        }

        for theater in theaters {
            out.push_str("Theater: ");
            out.push_str(theater);
            out.push('\n');

            for show in shows.iter().filter(|s| s.theater == theater) {
                out.push_str(&format!("  Movie: {} ({})\n", show.movie, show.date_time));
                out.push_str("    Available seats: ");
                if show.available.is_empty() {
                    out.push_str("SOLD OUT");
                } else {
                    for (i, seat) in show.available.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        out.push_str(&seat.to_string());
                    }
                }
                out.push_str(&format!(
                    " (Total: {}/{})\n",
                    show.available.len(),
                    show.seat_count
                ));
            }
            out.push('\n');
        }
    }
}

impl SnapshotFormatter for TextFormatter {
    fn render_catalog(&self, shows: &[ShowAvailability]) -> String {
        let mut out = String::from("=== CINEMA DATA STREAM ===\n");
        Self::render_body(shows, &mut out);
        out.push_str("=== END CINEMA DATA ===\n");
        out
    }

    fn render_update(&self, shows: &[ShowAvailability]) -> String {
        let mut out = String::from("BOOKING_UPDATE:\n=== UPDATED CINEMA DATA ===\n");
        Self::render_body(shows, &mut out);
        out.push_str("=== END UPDATED DATA ===\n");
        out
    }
}
