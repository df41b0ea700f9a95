use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// CSV file holding the clustered movie catalog
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Directory served for every non-API path
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Recommendation count used when a request does not name one
    #[serde(default = "default_recommendations")]
    pub default_recommendations: i64,

    /// Autocomplete limit used when a request does not name one
    #[serde(default = "default_search_limit")]
    pub default_search_limit: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_data_path() -> PathBuf {
    PathBuf::from("movie_recommendation_dbscan.csv")
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("frontend")
}

fn default_recommendations() -> i64 {
    5
}

fn default_search_limit() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_path: default_data_path(),
            static_dir: default_static_dir(),
            default_recommendations: default_recommendations(),
            default_search_limit: default_search_limit(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address string the listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(vars(&[])).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.data_path, PathBuf::from("movie_recommendation_dbscan.csv"));
        assert_eq!(config.static_dir, PathBuf::from("frontend"));
        assert_eq!(config.default_recommendations, 5);
        assert_eq!(config.default_search_limit, 10);
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(vars(&[
            ("PORT", "8080"),
            ("DATA_PATH", "/data/movies.csv"),
            ("DEFAULT_SEARCH_LIMIT", "25"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.data_path, PathBuf::from("/data/movies.csv"));
        assert_eq!(config.default_search_limit, 25);
    }

    #[test]
    fn test_invalid_port() {
        assert!(Config::from_vars(vars(&[("PORT", "not-a-port")])).is_err());
    }
}
