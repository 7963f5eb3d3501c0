pub mod api;
pub mod config;
pub mod middleware;
pub mod server;
pub mod tmdb;
pub mod util;

use std::net::SocketAddr;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("HTTP client error: {0}")]
    Client(#[from] tmdb::TmdbError),
    #[error("Server error: {0}")]
    Server(String),
}

pub async fn run(config_path: &str, explicit: bool) -> Result<(), ServerError> {
    let config = config::Config::load(config_path, explicit)?;

    info!("Using config file: {}", config_path);
    info!("TMDB base URL: {}", config.tmdb.base_url);
    if config.tmdb.api_key().is_none() {
        warn!("No TMDB API key configured; set TMDB_API_KEY or tmdb.api_key");
    }

    let address = config.listen.address.as_deref().unwrap_or("[::]");
    let addr: SocketAddr = format!("{}:{}", address, config.listen.port)
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid address: {}", e)))?;

    let app = server::build_router(server::AppState::new(&config)?);

    match config.tls_files() {
        Some((cert_path, key_path)) => {
            info!(cert = cert_path, key = key_path, "Loading TLS files");
            let tls_config =
                axum_server::tls_rustls::RustlsConfig::from_pem_file(cert_path, key_path)
                    .await
                    .map_err(|e| ServerError::Server(format!("Failed to load TLS config: {}", e)))?;

            info!("Serving HTTPS on {}", addr);
            axum_server::bind_rustls(addr, tls_config)
                .serve(app.into_make_service())
                .await
                .map_err(|e| ServerError::Server(format!("Server error: {}", e)))
        }
        None => {
            info!("Serving HTTP on {}", addr);
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

            axum::serve(listener, app)
                .await
                .map_err(|e| ServerError::Server(format!("Server error: {}", e)))
        }
    }
}
