use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use tracing::debug;

use super::error::ApiError;
use super::routes::Route;
use crate::server::AppState;
use crate::util::QueryParams;

/// A JSON body relayed from TMDB byte for byte.
pub struct JsonBody(pub Bytes);

impl IntoResponse for JsonBody {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "application/json")], self.0).into_response()
    }
}

/// Serve any entry of the route table: validate, then forward.
pub async fn dispatch(
    state: &AppState,
    route: Route,
    path: HashMap<String, String>,
    query: QueryParams,
) -> Result<JsonBody, ApiError> {
    let request = route.resolve(&path, query)?;

    debug!(route = ?route, endpoint = %request.endpoint, "Forwarding request");

    let body = state.tmdb.fetch(&request).await?;
    Ok(JsonBody(body))
}

pub async fn route_handler(
    route: Route,
    State(state): State<AppState>,
    path: Option<Path<HashMap<String, String>>>,
    Query(query): Query<QueryParams>,
) -> Result<JsonBody, ApiError> {
    let path = path.map(|Path(p)| p).unwrap_or_default();
    dispatch(&state, route, path, query).await
}
