use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::domain::DomainError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub elasticsearch: ElasticsearchConfig,
    pub server: ServerConfig,
    pub default_index: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ElasticsearchConfig {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            elasticsearch: ElasticsearchConfig::default(),
            server: ServerConfig::default(),
            default_index: "files".to_string(),
        }
    }
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9200".to_string(),
            username: None,
            password: None,
            timeout_secs: 30,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ElasticsearchConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Loads `.env`, then the YAML file named by `CONFIG_PATH` if set, then
    /// applies environment overrides on top.
    pub fn load() -> Result<Self, DomainError> {
        dotenvy::dotenv().ok();

        let config = match std::env::var("CONFIG_PATH") {
            Ok(path) => Self::from_yaml_file(path)?,
            Err(_) => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DomainError::validation(format!("cannot read config {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&raw)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, DomainError> {
        let config: Self = serde_yaml::from_str(raw)
            .map_err(|e| DomainError::validation(format!("invalid config: {e}")))?;
        if config.elasticsearch.timeout_secs == 0 {
            return Err(DomainError::validation("elasticsearch.timeout_secs must be positive"));
        }
        Ok(config)
    }

    fn apply_env(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self, DomainError> {
        if let Some(url) = var("ELASTICSEARCH_URL") {
            self.elasticsearch.url = url;
        }
        if let Some(username) = var("ELASTICSEARCH_USERNAME") {
            self.elasticsearch.username = Some(username);
        }
        if let Some(password) = var("ELASTICSEARCH_PASSWORD") {
            self.elasticsearch.password = Some(password);
        }
        if let Some(timeout) = var("ELASTICSEARCH_TIMEOUT_SECS") {
            self.elasticsearch.timeout_secs = match timeout.parse() {
                Ok(0) | Err(_) => {
                    return Err(DomainError::validation(format!(
                        "ELASTICSEARCH_TIMEOUT_SECS must be a positive number: {timeout}"
                    )))
                }
                Ok(secs) => secs,
            };
        }
        if let Some(host) = var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("SERVER_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| DomainError::validation(format!("SERVER_PORT is not a port: {port}")))?;
        }
        if let Some(index) = var("DEFAULT_INDEX") {
            self.default_index = index;
        }
        Ok(self)
    }
}
