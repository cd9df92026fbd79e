//! Cinema booking server demo
//!
//! Serves the reference catalog: 3 movies in 3 theaters, 20 seats each,
//! with seeded occupancy patterns. Connect with `booking_client` or any
//! WebSocket client and send e.g. `PVR,Inception,1,2,3`.

use std::sync::Arc;

use cinema_rs::catalog::{Catalog, TextFormatter};
use cinema_rs::server::{CinemaServer, ServerConfig};

#[tokio::main]
async fn main() -> cinema_rs::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cinema_rs=debug,info")),
        )
        .init();

    let movies = ["Inception", "Interstellar", "Tenet"];
    let theaters = ["PVR", "IMAX", "Cinepolis"];

    let patterns: [Vec<bool>; 3] = [
        vec![
            true, true, false, false, true, //
            false, false, false, false, true, //
            true, false, false, true, true, //
            false, false, false, true, false,
        ],
        vec![
            false, true, false, true, false, //
            true, false, true, true, false, //
            false, true, true, false, false, //
            true, true, false, false, true,
        ],
        vec![
            true, false, true, true, true, //
            false, true, true, false, true, //
            true, false, true, true, true, //
            false, false, true, true, true,
        ],
    ];

    let mut builder = Catalog::builder();
    let mut pattern_index = 0;
    for theater in theaters {
        for movie in movies {
            builder = builder.show_with_occupancy(
                movie,
                "2025-09-11 19:30",
                theater,
                patterns[pattern_index % patterns.len()].clone(),
            );
            pattern_index += 1;
        }
    }
    let catalog = Arc::new(builder.build());

    for show in catalog.shows() {
        let available = show.available_seats().await;
        tracing::info!(
            theater = %show.theater,
            movie = %show.movie,
            free = available.len(),
            "Show seeded"
        );
    }

    let config = ServerConfig::default();
    let server = CinemaServer::new(config, catalog, TextFormatter);

    tracing::info!("Connect to ws://localhost:8080");
    server
        .run_until(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
}
