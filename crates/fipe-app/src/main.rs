use std::sync::Arc;

use salvo::conn::TcpListener;
use salvo::cors::Cors;
use salvo::http::Method;
use salvo::{Listener, Router};

use fipe_app::app::api::routes;
use fipe_app::config::ConfigHandler;
use fipe_app::store_handler::StoreProviderHandler;
use fipe_core::config::load_config;
use fipe_store::store::HistoryStore;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting FIPE history service");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let store = HistoryStore::new(config.storage.history_file.clone());

    tracing::info!(path = %store.path().display(), "History store opened");

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    // The browser UI is served from another origin
    let cors = Cors::new()
        .allow_origin("*")
        .allow_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers("content-type")
        .into_handler();

    let router = Router::new()
        .hoop(cors)
        .hoop(StoreProviderHandler {
            store: Arc::new(store),
        })
        .hoop(ConfigHandler {
            settings: config.clone(),
        })
        .push(routes());

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
