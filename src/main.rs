use std::env;
use std::error::Error;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use justtip::api::{AppState, create_router};
use justtip::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/default";

fn init_tracing() {
    let filter = EnvFilter::try_from_env("JUSTTIP_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config_dir = env::var("JUSTTIP_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        employees = config.employees().len(),
        rounding = ?config.rounding(),
        "Configuration loaded"
    );

    let state = AppState::from_config(&config);
    let router = create_router(state);

    let bind_address = &config.settings().server.bind_address;
    let listener = TcpListener::bind(bind_address.as_str()).await?;
    info!(address = %bind_address, "JustTip listening");

    axum::serve(listener, router).await?;
    Ok(())
}
