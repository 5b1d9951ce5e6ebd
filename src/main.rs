//! Postal tariff HTTP server.
//!
//! Loads the tariff from `POSTAL_TARIFF_CONFIG` (default `./config/iran_post`)
//! and serves the quote API on `POSTAL_TARIFF_ADDR` (default `0.0.0.0:3000`).
//! Logging honours `RUST_LOG`; set `LOG_FORMAT=json` for JSON lines.

use postal_tariff::api::{AppState, create_router};
use postal_tariff::config::ConfigLoader;
use tracing::{error, info};

const DEFAULT_CONFIG_DIR: &str = "./config/iran_post";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let format = std::env::var("LOG_FORMAT").unwrap_or_default();
    match format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config_dir =
        std::env::var("POSTAL_TARIFF_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = match ConfigLoader::load(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            error!(path = %config_dir, error = %e, "Failed to load tariff");
            return Err(e.into());
        }
    };
    info!(
        code = %config.metadata().code,
        version = %config.metadata().version,
        regions = config.regions().len(),
        services = config.rates().service_count(),
        "Tariff loaded from {}",
        config_dir
    );

    let addr = std::env::var("POSTAL_TARIFF_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, router).await?;
    Ok(())
}
