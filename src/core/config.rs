//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.postpilot/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::DEFAULT_PLUGIN_ID;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PostpilotConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub guard_in_flight_summaries: Option<bool>,
    pub notice_seconds: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub url: Option<String>,
    pub token: Option<String>,
    pub plugin_id: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_NOTICE_SECONDS: u64 = 4;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub server_url: Option<String>,
    pub token: Option<String>,
    pub plugin_id: String,
    pub request_timeout: Duration,
    pub guard_in_flight_summaries: bool,
    pub notice_duration: Duration,
}

/// Values supplied on the command line. `None` means "not given".
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub server_url: Option<&'a str>,
    pub token: Option<&'a str>,
    pub plugin_id: Option<&'a str>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.postpilot/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".postpilot").join("config.toml"))
}

/// Load config from `~/.postpilot/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PostpilotConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<PostpilotConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(PostpilotConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<PostpilotConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(PostpilotConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: PostpilotConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Postpilot Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# guard_in_flight_summaries = false  # ignore repeat summarize clicks while one runs
# notice_seconds = 4                 # how long toasts stay on screen

# [server]
# url = "https://chat.example.com"   # Or set POSTPILOT_SERVER_URL
# token = "..."                      # Or set POSTPILOT_TOKEN
# plugin_id = "mattermost-ai"        # Or set POSTPILOT_PLUGIN_ID
# request_timeout_secs = 120
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &PostpilotConfig, cli: &CliOverrides<'_>) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &PostpilotConfig,
    cli: &CliOverrides<'_>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Server URL: CLI → env → config
    let server_url = cli
        .server_url
        .map(|s| s.to_string())
        .or_else(|| env("POSTPILOT_SERVER_URL"))
        .or_else(|| config.server.url.clone());

    // Token: CLI → env → config
    let token = cli
        .token
        .map(|s| s.to_string())
        .or_else(|| env("POSTPILOT_TOKEN"))
        .or_else(|| config.server.token.clone());

    // Plugin id: CLI → env → config → default
    let plugin_id = cli
        .plugin_id
        .map(|s| s.to_string())
        .or_else(|| env("POSTPILOT_PLUGIN_ID"))
        .or_else(|| config.server.plugin_id.clone())
        .unwrap_or_else(|| DEFAULT_PLUGIN_ID.to_string());

    ResolvedConfig {
        server_url,
        token,
        plugin_id,
        request_timeout: Duration::from_secs(
            config
                .server
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        ),
        guard_in_flight_summaries: config.general.guard_in_flight_summaries.unwrap_or(false),
        notice_duration: Duration::from_secs(
            config.general.notice_seconds.unwrap_or(DEFAULT_NOTICE_SECONDS),
        ),
    }
}
