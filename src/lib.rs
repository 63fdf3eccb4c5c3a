pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod hashnode;
pub mod records;
pub mod state;
pub mod storage;

use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

use crate::{config::Config, engine::Engine, hashnode::HashnodeClient, state::AppState};

pub async fn run() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_env_filter(EnvFilter::from_env("FOLIO_LOG"))
        .init();

    let config = Config::from_env();

    let state = AppState::new(
        storage::init_db_from_env().await,
        HashnodeClient::new(&config.hashnode),
        Engine::new(config.listing_page_size),
        config,
    );

    api::run_server(state).await
}
