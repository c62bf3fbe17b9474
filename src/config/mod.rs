use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Similarity a candidate must exceed to be returned.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.01;

/// Number of results returned when the caller does not ask for a count.
pub const DEFAULT_TOP_N: usize = 10;

/// Highest per-IP request rate the limiter can express at millisecond resolution.
pub const MAX_API_RATE_LIMIT: u64 = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub corpus: CorpusConfig,
    pub recommender: RecommenderConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommenderConfig {
    pub similarity_threshold: f64,
    pub default_top_n: usize,
    pub max_top_n: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            default_top_n: DEFAULT_TOP_N,
            max_top_n: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub external_url: Option<String>,
    pub api_rate_limit: u64,
    pub max_request_body_size: usize,
}

impl ServerConfig {
    /// Interval after which one more request is allowed, for a limit of
    /// `api_rate_limit` requests per second.
    pub fn rate_limit_period_ms(&self) -> u64 {
        (1000 / self.api_rate_limit.max(1)).max(1)
    }

    /// Requests a single client may send back to back before being throttled
    pub fn rate_limit_burst(&self) -> u32 {
        u32::try_from(self.api_rate_limit.saturating_mul(2)).unwrap_or(u32::MAX)
    }
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let corpus_path = std::env::var("CORPUS_PATH")
            .unwrap_or_else(|_| "./data/recipes.csv".to_string())
            .into();

        let similarity_threshold = std::env::var("SIMILARITY_THRESHOLD")
            .unwrap_or_else(|_| DEFAULT_SIMILARITY_THRESHOLD.to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid SIMILARITY_THRESHOLD value".to_string()))?;

        let default_top_n = std::env::var("DEFAULT_TOP_N")
            .unwrap_or_else(|_| DEFAULT_TOP_N.to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid DEFAULT_TOP_N value".to_string()))?;

        let max_top_n = std::env::var("MAX_TOP_N")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid MAX_TOP_N value".to_string()))?;

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid PORT value".to_string()))?;

        let external_url = std::env::var("EXTERNAL_URL").ok();

        let api_rate_limit = std::env::var("API_RATE_LIMIT")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid API_RATE_LIMIT value".to_string()))?;

        let max_request_body_size = std::env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| "1048576".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid MAX_REQUEST_BODY_SIZE value".to_string()))?;

        Ok(Settings {
            corpus: CorpusConfig { path: corpus_path },
            recommender: RecommenderConfig {
                similarity_threshold,
                default_top_n,
                max_top_n,
            },
            server: ServerConfig {
                host,
                port,
                external_url,
                api_rate_limit,
                max_request_body_size,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.server.api_rate_limit == 0 || self.server.api_rate_limit > MAX_API_RATE_LIMIT {
            return Err(Error::Config(format!(
                "API rate limit must be between 1 and {MAX_API_RATE_LIMIT} requests per second"
            )));
        }

        let threshold = self.recommender.similarity_threshold;
        if !(0.0..1.0).contains(&threshold) {
            return Err(Error::Config(format!(
                "Similarity threshold must be in [0, 1), got {threshold}"
            )));
        }

        if self.recommender.default_top_n == 0
            || self.recommender.default_top_n > self.recommender.max_top_n
        {
            return Err(Error::Config(format!(
                "Default top-n must be between 1 and {}",
                self.recommender.max_top_n
            )));
        }

        Ok(())
    }

    /// Base URL clients should use to reach this server
    pub fn server_url(&self) -> String {
        self.server
            .external_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.server.host, self.server.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> Settings {
        Settings {
            corpus: CorpusConfig {
                path: "/tmp/recipes.csv".into(),
            },
            recommender: RecommenderConfig::default(),
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                external_url: None,
                api_rate_limit: 100,
                max_request_body_size: 1048576,
            },
        }
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = test_settings();
        assert!(settings.validate().is_ok());

        settings.server.port = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rate_limit_bounds() {
        let mut settings = test_settings();

        settings.server.api_rate_limit = 0;
        assert!(settings.validate().is_err());

        settings.server.api_rate_limit = MAX_API_RATE_LIMIT + 1;
        assert!(settings.validate().is_err());

        settings.server.api_rate_limit = u64::MAX;
        assert!(settings.validate().is_err());

        settings.server.api_rate_limit = MAX_API_RATE_LIMIT;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_rate_limit_is_requests_per_second() {
        let mut server = test_settings().server;

        // 100 req/s refills one slot every 10ms
        assert_eq!(server.rate_limit_period_ms(), 10);
        assert_eq!(server.rate_limit_burst(), 200);

        server.api_rate_limit = 1;
        assert_eq!(server.rate_limit_period_ms(), 1000);
        assert_eq!(server.rate_limit_burst(), 2);

        server.api_rate_limit = MAX_API_RATE_LIMIT;
        assert_eq!(server.rate_limit_period_ms(), 1);

        server.api_rate_limit = 3000;
        assert_eq!(server.rate_limit_period_ms(), 1);

        server.api_rate_limit = u64::MAX;
        assert_eq!(server.rate_limit_burst(), u32::MAX);
    }

    #[test]
    fn test_threshold_must_be_below_one() {
        let mut settings = test_settings();

        settings.recommender.similarity_threshold = 1.0;
        assert!(settings.validate().is_err());

        settings.recommender.similarity_threshold = -0.1;
        assert!(settings.validate().is_err());

        settings.recommender.similarity_threshold = 0.0;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_default_top_n_bounded_by_max() {
        let mut settings = test_settings();

        settings.recommender.default_top_n = 0;
        assert!(settings.validate().is_err());

        settings.recommender.default_top_n = 101;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_recommender_defaults() {
        let config = RecommenderConfig::default();
        assert_eq!(config.similarity_threshold, 0.01);
        assert_eq!(config.default_top_n, 10);
    }

    #[test]
    fn test_server_url_prefers_external() {
        let mut settings = test_settings();
        assert_eq!(settings.server_url(), "http://127.0.0.1:3000");

        settings.server.external_url = Some("https://recipes.example.com".to_string());
        assert_eq!(settings.server_url(), "https://recipes.example.com");
    }
}
