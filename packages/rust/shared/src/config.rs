//! Application configuration for dinodir.
//!
//! User config lives at `~/.dinodir/dinodir.toml`.
//! Environment variables override config file values, which override defaults.
//! CLI flags override both.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DinoDirError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "dinodir.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".dinodir";

/// Env var overriding `server.port`.
const PORT_ENV: &str = "PORT";

/// Env var overriding `source.base_url`.
const BASE_URL_ENV: &str = "DINODIR_BASE_URL";

// ---------------------------------------------------------------------------
// Config structs (matching dinodir.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Where documents are fetched from.
    #[serde(default)]
    pub source: SourceSection,

    /// Detail fan-out settings.
    #[serde(default)]
    pub enrichment: EnrichmentSection,
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8080
}

/// `[source]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSection {
    /// Base URL every relative document path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Relative path of the index document (empty = landing page).
    #[serde(default)]
    pub index_path: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            index_path: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.nhm.ac.uk/discover/dino-directory".into()
}
fn default_timeout_secs() -> u64 {
    30
}

/// `[enrichment]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentSection {
    /// Maximum detail fetches in flight at once.
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
}

impl Default for EnrichmentSection {
    fn default() -> Self {
        Self {
            max_in_flight: default_max_in_flight(),
        }
    }
}

fn default_max_in_flight() -> usize {
    8
}

// ---------------------------------------------------------------------------
// Runtime configs (derived from AppConfig, passed explicitly)
// ---------------------------------------------------------------------------

/// Runtime source configuration used to build the HTTP client.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Relative path of the index document.
    pub index_path: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl SourceConfig {
    /// Build a source config for `base_url` with default index path and timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            index_path: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Path component of the base URL (e.g. `/discover/dino-directory`), no trailing slash.
    pub fn base_path(&self) -> Result<String> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            DinoDirError::config(format!("invalid base_url '{}': {e}", self.base_url))
        })?;
        Ok(url.path().trim_end_matches('/').to_string())
    }
}

impl From<&AppConfig> for SourceConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            index_path: config.source.index_path.clone(),
            timeout_secs: config.source.timeout_secs,
            ..Self::new(config.source.base_url.clone())
        }
    }
}

/// Runtime enrichment configuration.
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    /// Maximum detail fetches in flight at once (at least 1).
    pub max_in_flight: usize,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            max_in_flight: default_max_in_flight(),
        }
    }
}

impl From<&AppConfig> for EnrichConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_in_flight: config.enrichment.max_in_flight.max(1),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.dinodir/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| DinoDirError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.dinodir/dinodir.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk and apply environment overrides.
/// Uses defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    let mut config = if path.exists() {
        load_config_from(&path)?
    } else {
        tracing::debug!(?path, "config file not found, using defaults");
        AppConfig::default()
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    Ok(config)
}

/// Load the application config from a specific file path (no env overrides).
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DinoDirError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| DinoDirError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Apply `PORT` and `DINODIR_BASE_URL` using the given variable lookup.
pub fn apply_env_overrides(
    config: &mut AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(port) = lookup(PORT_ENV).filter(|v| !v.is_empty()) {
        config.server.port = port
            .parse()
            .map_err(|_| DinoDirError::config(format!("{PORT_ENV} must be a port number, got '{port}'")))?;
    }

    if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.is_empty()) {
        config.source.base_url = base_url;
    }

    Ok(())
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| DinoDirError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| DinoDirError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DinoDirError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
