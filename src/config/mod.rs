pub mod aliases;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub corpus: CorpusConfig,
    pub aliases: AliasSettings,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub external_url: Option<String>,
    pub api_rate_limit: u64,
}

impl ServerConfig {
    /// Base URL printed for clients: `EXTERNAL_URL` when set (for deployments
    /// behind a proxy), otherwise the bind address.
    pub fn public_url(&self) -> String {
        match self.external_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
            _ => format!("http://{}:{}", self.host, self.port),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// File path or http(s) URL of the recipe document
    pub source: String,
    pub max_size: usize,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasSettings {
    pub config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub api_max_limit: usize,
    pub default_limit: usize,
    pub max_request_body_size: usize,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
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

        let source =
            std::env::var("CORPUS_SOURCE").unwrap_or_else(|_| "./data/recipes.json".to_string());

        let max_size = std::env::var("CORPUS_MAX_SIZE")
            .unwrap_or_else(|_| "10485760".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid CORPUS_MAX_SIZE value".to_string()))?;

        let config_path = std::env::var("ALIAS_CONFIG_PATH").ok().map(PathBuf::from);

        let api_max_limit = std::env::var("API_MAX_LIMIT")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid API_MAX_LIMIT value".to_string()))?;

        let default_limit = std::env::var("DEFAULT_LIMIT")
            .unwrap_or_else(|_| "20".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid DEFAULT_LIMIT value".to_string()))?;

        let max_request_body_size = std::env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| "1048576".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid MAX_REQUEST_BODY_SIZE value".to_string()))?;

        Ok(Settings {
            server: ServerConfig {
                host,
                port,
                external_url,
                api_rate_limit,
            },
            corpus: CorpusConfig {
                source,
                max_size,
                user_agent: format!("Pakauu/{}", env!("CARGO_PKG_VERSION")),
            },
            aliases: AliasSettings { config_path },
            limits: LimitsConfig {
                api_max_limit,
                default_limit,
                max_request_body_size,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.server.api_rate_limit == 0 {
            return Err(Error::Config("API rate limit must be non-zero".to_string()));
        }

        if self.corpus.source.trim().is_empty() {
            return Err(Error::Config("CORPUS_SOURCE cannot be empty".to_string()));
        }

        if self.limits.default_limit == 0 || self.limits.api_max_limit == 0 {
            return Err(Error::Config("Result limits must be non-zero".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn test_settings() -> Settings {
    Settings {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            external_url: None,
            api_rate_limit: 100,
        },
        corpus: CorpusConfig {
            source: "./data/recipes.json".to_string(),
            max_size: 10485760,
            user_agent: "test".to_string(),
        },
        aliases: AliasSettings { config_path: None },
        limits: LimitsConfig {
            api_max_limit: 100,
            default_limit: 20,
            max_request_body_size: 1048576,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_validation() {
        let mut settings = test_settings();
        assert!(settings.validate().is_ok());

        settings.server.port = 0;
        assert!(settings.validate().is_err());

        let mut settings = test_settings();
        settings.server.api_rate_limit = 0;
        assert!(settings.validate().is_err());

        let mut settings = test_settings();
        settings.corpus.source = "  ".to_string();
        assert!(settings.validate().is_err());

        let mut settings = test_settings();
        settings.limits.default_limit = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_public_url() {
        let mut settings = test_settings();
        assert_eq!(settings.server.public_url(), "http://127.0.0.1:3000");

        settings.server.external_url = Some("https://pakauu.example.com/".to_string());
        assert_eq!(settings.server.public_url(), "https://pakauu.example.com");

        settings.server.external_url = Some(" ".to_string());
        assert_eq!(settings.server.public_url(), "http://127.0.0.1:3000");
    }
}
