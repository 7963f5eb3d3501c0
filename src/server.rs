use axum::{extract::Request, http::Method, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api::{build_api_router, ApiError};
use crate::config::Config;
use crate::tmdb::{TmdbClient, TmdbError};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub tmdb: Arc<TmdbClient>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, TmdbError> {
        let tmdb = TmdbClient::new(&config.tmdb)?;
        Ok(Self {
            tmdb: Arc::new(tmdb),
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/robots.txt", get(robots_txt_handler))
        .merge(build_api_router())
        .fallback(fallback_handler)
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn robots_txt_handler() -> &'static str {
    "User-agent: *\nDisallow: /\n"
}

async fn fallback_handler(req: Request) -> impl IntoResponse {
    // Preflight requests are answered by the CORS layer; a bare OPTIONS
    // without CORS headers still gets an empty 200.
    if req.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    ApiError::NotFound.into_response()
}
