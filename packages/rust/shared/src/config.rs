//! Application configuration for InterwikiExtracts.
//!
//! User config lives at `~/.interwiki-extracts/interwiki.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{InterwikiPrefix, PrefixDirectory};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "interwiki.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".interwiki-extracts";

/// Config loading uses plain I/O errors rather than the extract taxonomy:
/// a broken config file is a host problem, not an invocation failure.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Error loading or writing the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Invalid(String),

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Config structs (matching interwiki.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Registered interwiki prefixes, in lookup order.
    #[serde(default = "default_interwiki_table")]
    pub interwiki: Vec<InterwikiEntry>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: DefaultsConfig::default(),
            interwiki: default_interwiki_table(),
        }
    }
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default output format name (`text`, `html`, or `wiki`).
    #[serde(default = "default_format")]
    pub format: String,

    /// HTTP timeout in seconds for remote requests.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_format() -> String {
    "html".into()
}
fn default_timeout_secs() -> u64 {
    30
}

/// `[[interwiki]]` entry — one registered prefix in the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterwikiEntry {
    /// The interwiki short-name.
    pub prefix: String,
    /// API base URL of the remote site, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<String>,
}

fn default_interwiki_table() -> Vec<InterwikiEntry> {
    vec![InterwikiEntry {
        prefix: "wikipedia".into(),
        api: Some("https://en.wikipedia.org/w/api.php".into()),
    }]
}

impl PrefixDirectory for AppConfig {
    fn all_prefixes(&self) -> Vec<InterwikiPrefix> {
        self.interwiki
            .iter()
            .map(|entry| InterwikiPrefix {
                prefix: entry.prefix.clone(),
                api: entry.api.clone(),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.interwiki-extracts/`).
pub fn config_dir() -> ConfigResult<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ConfigError::Invalid("could not determine home directory".into()))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.interwiki-extracts/interwiki.toml`).
pub fn config_file_path() -> ConfigResult<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> ConfigResult<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> ConfigResult<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.into(),
        source: e,
    })?;

    toml::from_str(&content)
        .map_err(|e| ConfigError::Invalid(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> ConfigResult<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::Io {
        path: dir.clone(),
        source: e,
    })?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| ConfigError::Invalid(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ConfigError::Io {
        path: path.clone(),
        source: e,
    })?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
