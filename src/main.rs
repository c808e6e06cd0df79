mod chain;
mod config;
mod content;
mod error;
mod mint;
mod notify;
mod pages;
mod routes;
mod state;
mod wallet;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::chain::gateway::GatewayFactory;
use crate::content::image::ImageUrlBuilder;
use crate::content::sanity::SanityClient;
use crate::wallet::BackendWallet;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")))
        .init();

    let config = config::AppConfig::from_env().expect("invalid configuration");

    let content = SanityClient::new(&config.cms, config.timeouts).expect("content client init failed");
    let contracts = GatewayFactory::new(config.gateway.clone(), config.timeouts).expect("gateway client init failed");

    if config.wallet_address.is_none() {
        tracing::warn!("WALLET_ADDRESS not set; sign in and minting disabled");
    }

    let state = state::AppState::new(
        Arc::new(content),
        ImageUrlBuilder::from_config(&config.cms),
        Arc::new(contracts),
        Arc::new(BackendWallet::new(config.wallet_address.clone())),
    );

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, chain = %config.gateway.chain, "nftdrop listening");
    axum::serve(listener, app).await.expect("server failed");
}
