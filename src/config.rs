//! Configuration management for the orator CLI and SDK

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{OratorError, Result};

/// Default platform endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.oratorai.app/api";

/// CLI-managed configuration persisted as JSON under the user config dir.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    pub endpoint: String,
    pub timeout: u64,
    pub verbose: bool,
    pub storage_dir: PathBuf,
    pub session_storage_enabled: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: 30,
            verbose: false,
            storage_dir: default_storage_dir(),
            session_storage_enabled: true,
        }
    }
}

impl CliConfig {
    pub async fn load(config_path: Option<&Path>) -> Result<Self> {
        let config_file = match config_path {
            Some(path) => path.to_path_buf(),
            None => default_config_path(),
        };

        if config_file.exists() {
            let content = fs::read_to_string(&config_file).await?;

            match serde_json::from_str::<Self>(&content) {
                Ok(mut config) => {
                    #[cfg(not(debug_assertions))]
                    {
                        config.endpoint = Self::default().endpoint;
                    }
                    Ok(config)
                }
                Err(_) => {
                    // Unparseable config file is replaced with defaults.
                    let config = Self::default();
                    config.save(&config_file).await?;
                    Ok(config)
                }
            }
        } else {
            let config = Self::default();
            config.save(&config_file).await?;
            Ok(config)
        }
    }

    pub async fn save(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content).await?;
        Ok(())
    }

    /// Derive the SDK client configuration from the CLI settings.
    pub fn to_sdk_config(&self) -> ClientConfig {
        let use_proxy =
            !self.endpoint.contains("localhost") && !self.endpoint.contains("127.0.0.1");

        let mut builder = ClientConfigBuilder::new()
            .base_url(&self.endpoint)
            .timeout(self.timeout)
            .verbose(self.verbose)
            .use_proxy(use_proxy);

        if self.session_storage_enabled {
            let session_dir = self.storage_dir.join("session");
            let session_config = SessionStorageConfig {
                enabled: true,
                storage_path: Some(session_dir.join("session.json").to_string_lossy().to_string()),
                obfuscation_key: None,
            };
            builder = builder.session_storage(session_config);
        }

        builder.build().unwrap_or_else(|_| {
            ClientConfigBuilder::new()
                .base_url(DEFAULT_ENDPOINT)
                .build()
                .unwrap_or_default()
        })
    }
}

pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("orator")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.json")
}

pub fn default_storage_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("orator")
}

/// Session storage configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SessionStorageConfig {
    #[serde(default)]
    pub enabled: bool,
    pub storage_path: Option<String>,
    pub obfuscation_key: Option<String>,
}

impl From<SessionStorageConfig> for crate::session::SessionStoreConfig {
    fn from(config: SessionStorageConfig) -> Self {
        Self {
            enabled: config.enabled,
            storage_path: config.storage_path.map(PathBuf::from),
            obfuscation_key: config.obfuscation_key,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub session_storage: SessionStorageConfig,
    #[serde(default = "default_use_proxy")]
    pub use_proxy: bool,
}

fn default_timeout() -> u64 {
    30
}

fn default_use_proxy() -> bool {
    true
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ENDPOINT.to_string(),
            timeout: default_timeout(),
            verbose: false,
            session_storage: SessionStorageConfig::default(),
            use_proxy: default_use_proxy(),
        }
    }
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    timeout: Option<u64>,
    verbose: Option<bool>,
    session_storage: Option<SessionStorageConfig>,
    config_file: Option<PathBuf>,
    use_proxy: Option<bool>,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: u64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    pub fn use_proxy(mut self, use_proxy: bool) -> Self {
        self.use_proxy = Some(use_proxy);
        self
    }

    pub fn session_storage(mut self, session_storage: SessionStorageConfig) -> Self {
        self.session_storage = Some(session_storage);
        self
    }

    pub fn config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn build(self) -> Result<ClientConfig> {
        let mut config = ClientConfig::from_file_and_env(self.config_file.as_deref())?;

        #[cfg(debug_assertions)]
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }

        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(verbose) = self.verbose {
            config.verbose = verbose;
        }
        if let Some(session_storage) = self.session_storage {
            config.session_storage = session_storage;
        }
        if let Some(use_proxy) = self.use_proxy {
            config.use_proxy = use_proxy;
        }

        config.validate()?;
        Ok(config)
    }
}

impl ClientConfig {
    pub fn new() -> Result<Self> {
        Self::from_file_and_env::<&str>(None)
    }

    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    pub fn from_file_and_env<P: AsRef<Path>>(config_file: Option<P>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("base_url", DEFAULT_ENDPOINT)?
            .set_default("timeout", 30)?
            .set_default("verbose", false)?
            .set_default("use_proxy", true)?;

        if let Some(config_path) = config_file {
            if config_path.as_ref().exists() {
                builder = builder.add_source(File::from(config_path.as_ref()));
            }
        }
        builder = builder.add_source(Environment::with_prefix("ORATOR").try_parsing(true));

        // Release builds always talk to the production endpoint.
        #[cfg(not(debug_assertions))]
        {
            builder = builder.set_override("base_url", DEFAULT_ENDPOINT)?;
        }

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(OratorError::invalid_endpoint("Base URL cannot be empty"));
        }
        Ok(())
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        let endpoint = endpoint.strip_prefix('/').unwrap_or(endpoint);
        let base_url =
            if self.base_url.starts_with("http://") || self.base_url.starts_with("https://") {
                if cfg!(not(debug_assertions)) && self.base_url.starts_with("http://") {
                    self.base_url.replace("http://", "https://")
                } else {
                    self.base_url.clone()
                }
            } else {
                format!("https://{}", self.base_url)
            };

        format!("{}/{}", base_url.trim_end_matches('/'), endpoint)
    }
}

/// Service backing the `orator config` subcommands.
pub struct ConfigService {
    config: CliConfig,
    config_path: PathBuf,
}

impl ConfigService {
    pub fn new(config: CliConfig) -> Self {
        Self {
            config,
            config_path: default_config_path(),
        }
    }

    pub fn with_config_path(config: CliConfig, config_path: PathBuf) -> Self {
        Self {
            config,
            config_path,
        }
    }

    pub fn current(&self) -> &CliConfig {
        &self.config
    }

    #[cfg(debug_assertions)]
    pub async fn set_endpoint(&mut self, url: String) -> Result<()> {
        if url.trim().is_empty() {
            return Err(OratorError::invalid_endpoint("Endpoint cannot be empty"));
        }
        self.config.endpoint = url;
        self.config.save(&self.config_path).await
    }

    pub async fn set_timeout(&mut self, seconds: u64) -> Result<()> {
        if seconds == 0 {
            return Err(OratorError::invalid_input("Timeout must be at least 1 second"));
        }
        self.config.timeout = seconds;
        self.config.save(&self.config_path).await
    }

    pub async fn set_verbose(&mut self, enabled: bool) -> Result<()> {
        self.config.verbose = enabled;
        self.config.save(&self.config_path).await
    }

    pub async fn reset(&mut self) -> Result<()> {
        self.config = CliConfig::default();
        self.config.save(&self.config_path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::test_helpers::create_temp_dir;

    #[test]
    fn test_endpoint_url_joins_paths() {
        let config = ClientConfig {
            base_url: "https://api.oratorai.app/api".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(
            config.endpoint_url("/courses"),
            "https://api.oratorai.app/api/courses"
        );
        assert_eq!(
            config.endpoint_url("courses/5"),
            "https://api.oratorai.app/api/courses/5"
        );
    }

    #[test]
    fn test_endpoint_url_adds_scheme() {
        let config = ClientConfig {
            base_url: "api.oratorai.app/api".to_string(),
            ..ClientConfig::default()
        };
        assert!(config.endpoint_url("/auth/login").starts_with("https://"));
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let config = ClientConfig {
            base_url: String::new(),
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_cli_config_round_trip() {
        let dir = create_temp_dir();
        let path = dir.path().join("config.json");

        let mut config = CliConfig::default();
        config.timeout = 60;
        config.save(&path).await.unwrap();

        let loaded = CliConfig::load(Some(&path)).await.unwrap();
        assert_eq!(loaded.timeout, 60);
    }

    #[tokio::test]
    async fn test_cli_config_replaces_corrupt_file() {
        let dir = create_temp_dir();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let loaded = CliConfig::load(Some(&path)).await.unwrap();
        assert_eq!(loaded.timeout, CliConfig::default().timeout);
    }
}
