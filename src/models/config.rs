use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// Prefix of environment variables overriding configuration keys,
/// e.g. `TOURIST_API_BASE_URL`.
pub const ENV_PREFIX: &str = "TOURIST";

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.yaml";

/// Configuration options for the API client.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the REST API.
    pub api_base_url: String,
    /// File holding the persisted bearer token.
    pub token_path: PathBuf,
    /// Per-request timeout.
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            token_path: PathBuf::from(".tourist/token"),
            request_timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Loads defaults, then the optional YAML file at `path`, then
    /// `TOURIST_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let (file, required) = match path {
            Some(path) => (path.to_string_lossy().into_owned(), true),
            None => (DEFAULT_CONFIG_PATH.to_string(), false),
        };

        Config::builder()
            .set_default("api_base_url", defaults.api_base_url)?
            .set_default(
                "token_path",
                defaults.token_path.to_string_lossy().into_owned(),
            )?
            .set_default("request_timeout_secs", defaults.request_timeout_secs)?
            .add_source(File::new(&file, FileFormat::Yaml).required(required))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
