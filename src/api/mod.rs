//! Inbound side: the `/api` routes and how their failures are rendered.

pub mod error;
pub mod handlers;
pub mod health;
pub mod routes;

pub use error::*;
pub use handlers::*;
pub use health::*;
pub use routes::*;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use std::collections::HashMap;

use crate::server::AppState;
use crate::util::QueryParams;

pub fn build_api_router() -> Router<AppState> {
    let mut router = Router::new().route(
        "/api/health",
        get(health_check).fallback(method_not_allowed),
    );

    for spec in ROUTES {
        let route = spec.route;
        router = router.route(
            spec.path,
            get(
                move |state: State<AppState>,
                      path: Option<Path<HashMap<String, String>>>,
                      query: Query<QueryParams>| {
                    route_handler(route, state, path, query)
                },
            )
            .fallback(method_not_allowed),
        );
    }

    router
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
