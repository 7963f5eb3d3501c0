use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    #[serde(alias = "apikey", alias = "api-key")]
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(alias = "baseurl", alias = "base-url")]
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl TmdbConfig {
    /// The configured key, or `None` when it is absent or blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
        }
    }
}

fn default_port() -> String {
    "5000".to_string()
}

fn default_base_url() -> String {
    DEFAULT_TMDB_BASE_URL.to_string()
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        Self::from_yaml(&content).map_err(|e| ConfigError::ParseError(path.to_string(), e))
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file is a valid, all-defaults config.
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(content)
    }

    /// Load the config file if there is one, then apply environment overrides.
    ///
    /// A file named explicitly on the command line must exist; the default
    /// path is allowed to be absent.
    pub fn load(path: &str, explicit: bool) -> Result<Self, ConfigError> {
        let mut config = if explicit || Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            Config::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Override settings from `TMDB_API_KEY`, `TMDB_BASE_URL` and `PORT`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = lookup("TMDB_API_KEY") {
            self.tmdb.api_key = Some(key);
        }
        if let Some(url) = lookup("TMDB_BASE_URL") {
            self.tmdb.base_url = url;
        }
        if let Some(port) = lookup("PORT") {
            self.listen.port = port;
        }
    }

    /// Certificate and key paths, when both are set.
    pub fn tls_files(&self) -> Option<(&str, &str)> {
        match (&self.listen.tlscert, &self.listen.tlskey) {
            (Some(cert), Some(key)) => Some((cert.as_str(), key.as_str())),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config.listen.port, "5000");
        assert_eq!(config.tmdb.base_url, DEFAULT_TMDB_BASE_URL);
        assert!(config.tmdb.api_key().is_none());
        assert!(config.tls_files().is_none());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
listen:
  address: 127.0.0.1
  port: "8080"
tmdb:
  apikey: secret
  base_url: http://localhost:9000/3
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.listen.address.as_deref(), Some("127.0.0.1"));
        assert_eq!(config.listen.port, "8080");
        assert_eq!(config.tmdb.api_key(), Some("secret"));
        assert_eq!(config.tmdb.base_url, "http://localhost:9000/3");
    }

    #[test]
    fn test_tls_needs_both_files() {
        let config = Config::from_yaml("listen:\n  tlscert: cert.pem\n").unwrap();
        assert!(config.tls_files().is_none());

        let config =
            Config::from_yaml("listen:\n  tlscert: cert.pem\n  tlskey: key.pem\n").unwrap();
        assert_eq!(config.tls_files(), Some(("cert.pem", "key.pem")));
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let config = Config::from_yaml("tmdb:\n  api_key: \"  \"\n").unwrap();
        assert!(config.tmdb.api_key().is_none());

        let config = Config::from_yaml("tmdb:\n  api_key: \" padded \"\n").unwrap();
        assert_eq!(config.tmdb.api_key(), Some("padded"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("TMDB_API_KEY", "from-env"),
            ("TMDB_BASE_URL", ""),
            ("PORT", "7000"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::from_yaml("tmdb:\n  api_key: from-file\n").unwrap();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.tmdb.api_key(), Some("from-env"));
        assert_eq!(config.tmdb.base_url, DEFAULT_TMDB_BASE_URL);
        assert_eq!(config.listen.port, "7000");
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let err = Config::load("/nonexistent/tmdb-relay.yaml", true).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_, _)));
    }
}
