use std::time::Duration;

use dotenv::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gateway_cell::{RefreshService, RestGateway};
use shared_config::AppConfig;
use triage_cell::services::timefmt;
use triage_cell::{QueueView, ViewMode};

#[tokio::main]
async fn main() {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting clinic queue console");

    let config = AppConfig::from_env();
    let gateway = match RestGateway::new(&config) {
        Ok(gateway) => gateway,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return;
        }
    };

    let mut refresher = RefreshService::new(gateway);
    let mut ticker = tokio::time::interval(Duration::from_secs(config.poll_interval_secs));

    // Fetch -> recompute -> render; a failed poll retries on the next tick.
    loop {
        ticker.tick().await;
        match refresher.refresh_once().await {
            Ok(true) => render_serving_queue(&refresher),
            Ok(false) => {}
            Err(e) => warn!("Refresh failed, retrying on next tick: {}", e),
        }
    }
}

fn render_serving_queue(refresher: &RefreshService<RestGateway>) {
    let Some(QueueView::Serving(view)) = refresher.current_view(&ViewMode::Serving) else {
        return;
    };

    match &view.next {
        Some(next) => println!(
            "NOW SERVING  #{} {} ({}) at {}",
            next.id,
            next.subject_name,
            next.service_type,
            timefmt::format_display(next.time),
        ),
        None => println!("No approved appointments in queue."),
    }

    for (position, appointment) in view.waiting.iter().enumerate() {
        println!(
            "  {:>2}. #{} {} at {}",
            position + 1,
            appointment.id,
            appointment.subject_name,
            timefmt::format_display(appointment.time),
        );
    }
}
