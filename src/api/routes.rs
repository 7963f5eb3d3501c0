use std::collections::HashMap;

use super::error::ApiError;
use crate::tmdb::{Catalog, DetailKind, MediaType, SearchType, TimeWindow, UpstreamRequest};
use crate::util::QueryParams;

/// A proxied endpoint: which inbound path it answers and what it forwards to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    PopularMovies,
    Trending,
    Detail(DetailKind),
    Discover(Catalog),
    Genres(Catalog),
    Search,
}

pub struct RouteSpec {
    pub path: &'static str,
    pub route: Route,
}

pub const ROUTES: &[RouteSpec] = &[
    RouteSpec { path: "/api/movies", route: Route::PopularMovies },
    RouteSpec { path: "/api/trending/:media_type/:time_window", route: Route::Trending },
    RouteSpec { path: "/api/movie/:id", route: Route::Detail(DetailKind::Movie) },
    RouteSpec { path: "/api/tv/:id", route: Route::Detail(DetailKind::Tv) },
    RouteSpec { path: "/api/person/:id", route: Route::Detail(DetailKind::Person) },
    RouteSpec { path: "/api/discover/movie", route: Route::Discover(Catalog::Movie) },
    RouteSpec { path: "/api/discover/tv", route: Route::Discover(Catalog::Tv) },
    RouteSpec { path: "/api/genre/movie/list", route: Route::Genres(Catalog::Movie) },
    RouteSpec { path: "/api/genre/tv/list", route: Route::Genres(Catalog::Tv) },
    RouteSpec { path: "/api/search/:search_type", route: Route::Search },
];

impl Route {
    /// Validate the inbound parameters and build the upstream call.
    ///
    /// Nothing here touches the network, so a rejected request never
    /// reaches TMDB.
    pub fn resolve(
        self,
        path: &HashMap<String, String>,
        query: QueryParams,
    ) -> Result<UpstreamRequest, ApiError> {
        match self {
            Route::PopularMovies => Ok(UpstreamRequest::new("/movie/popular")),

            Route::Trending => {
                let media_type: MediaType = path_param(path, "media_type")
                    .parse()
                    .map_err(|_| ApiError::bad_request("Invalid media type"))?;
                let time_window: TimeWindow = path_param(path, "time_window")
                    .parse()
                    .map_err(|_| ApiError::bad_request("Invalid time window"))?;
                Ok(UpstreamRequest::new(format!(
                    "/trending/{}/{}",
                    media_type, time_window
                )))
            }

            Route::Detail(kind) => {
                let id = parse_id(path_param(path, "id"))
                    .ok_or_else(|| ApiError::bad_request(format!("Invalid {} id", kind)))?;
                let append = query
                    .get("append_to_response")
                    .unwrap_or(kind.default_append());
                Ok(UpstreamRequest::new(format!("/{}/{}", kind, id))
                    .param("append_to_response", append))
            }

            Route::Discover(catalog) => {
                Ok(UpstreamRequest::new(format!("/discover/{}", catalog)).with_params(query))
            }

            Route::Genres(catalog) => {
                Ok(UpstreamRequest::new(format!("/genre/{}/list", catalog)))
            }

            Route::Search => {
                let search_type: SearchType = path_param(path, "search_type")
                    .parse()
                    .map_err(|_| ApiError::bad_request("Invalid search type"))?;
                let text = query
                    .get_non_empty("query")
                    .ok_or_else(|| ApiError::bad_request("Query parameter is required"))?;
                let page = query.get_non_empty("page").unwrap_or("1");
                Ok(UpstreamRequest::new(format!("/search/{}", search_type))
                    .param("query", text)
                    .param("page", page))
            }
        }
    }
}

// `u64::from_str` also takes a leading `+`; ids are plain digits only.
fn parse_id(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn path_param<'a>(path: &'a HashMap<String, String>, name: &str) -> &'a str {
    path.get(name).map(|v| v.as_str()).unwrap_or("")
}
