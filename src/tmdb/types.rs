use std::fmt;
use std::str::FromStr;

use crate::util::QueryParams;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value: {0}")]
pub struct ParseKindError(pub String);

// Path segments that are checked against a fixed set of values before
// they are spliced into an upstream endpoint.
macro_rules! path_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ParseKindError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(ParseKindError(s.to_string())),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

path_enum! {
    /// Media type accepted by the trending endpoint.
    MediaType { Movie => "movie", Tv => "tv", All => "all" }
}

path_enum! {
    TimeWindow { Day => "day", Week => "week" }
}

path_enum! {
    SearchType { Movie => "movie", Tv => "tv", Multi => "multi" }
}

path_enum! {
    /// Catalogs that have discover and genre-list endpoints.
    Catalog { Movie => "movie", Tv => "tv" }
}

path_enum! {
    /// Resources that are looked up by numeric id.
    DetailKind { Movie => "movie", Tv => "tv", Person => "person" }
}

impl DetailKind {
    /// Sub-resources embedded in a detail response when the caller
    /// does not ask for specific ones.
    pub fn default_append(&self) -> &'static str {
        match self {
            DetailKind::Movie | DetailKind::Tv => "credits,similar,videos",
            DetailKind::Person => "combined_credits",
        }
    }
}

/// One outbound call: an endpoint below the base URL plus its query
/// parameters. The API key is added by the client, never here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub endpoint: String,
    pub params: QueryParams,
}

impl UpstreamRequest {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: QueryParams::new(),
        }
    }

    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_media_type() {
        assert_eq!("movie".parse::<MediaType>().unwrap(), MediaType::Movie);
        assert_eq!("all".parse::<MediaType>().unwrap(), MediaType::All);
        assert!("person".parse::<MediaType>().is_err());
        assert!("Movie".parse::<MediaType>().is_err());
        assert!("".parse::<MediaType>().is_err());
    }

    #[test]
    fn test_round_trip_display() {
        for kind in SearchType::ALL {
            assert_eq!(kind.to_string().parse::<SearchType>().unwrap(), *kind);
        }
        for window in TimeWindow::ALL {
            assert_eq!(window.as_str().parse::<TimeWindow>().unwrap(), *window);
        }
    }

    #[test]
    fn test_default_append() {
        assert_eq!(DetailKind::Movie.default_append(), "credits,similar,videos");
        assert_eq!(DetailKind::Tv.default_append(), "credits,similar,videos");
        assert_eq!(DetailKind::Person.default_append(), "combined_credits");
    }

    #[test]
    fn test_request_builder() {
        let req = UpstreamRequest::new("/search/movie")
            .param("query", "dune")
            .param("page", "1");
        assert_eq!(req.endpoint, "/search/movie");
        assert_eq!(req.params.get("query"), Some("dune"));
        assert_eq!(req.params.get("page"), Some("1"));
    }
}
