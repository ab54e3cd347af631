//! Shared configuration for Lidly tools.
//!
//! Profiles live in a TOML file under the user config directory, with a
//! `LIDLY_*` environment overlay. The refresh token — the only real
//! secret — resolves in priority order: inline config value, named
//! environment variable, system keyring. Plaintext storage is supported
//! but the CLI wizard steers users toward the keyring.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Keyring service name; entries are keyed `{profile}.refresh_token`.
const KEYRING_SERVICE: &str = "lidly";

// ── Types ───────────────────────────────────────────────────────────

/// Root configuration: a set of named account profiles plus defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

/// CLI defaults that profiles don't override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub output: String,
    pub color: String,
    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: "table".into(),
            color: "auto".into(),
            timeout: 10,
        }
    }
}

/// One loyalty account: the country/language pair the backend scopes
/// coupons by, plus where to find the refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Country code the account is registered in (e.g. `ES`, `DE`).
    pub country: String,
    /// BCP 47 language tag sent as `Accept-Language` (e.g. `es-ES`).
    pub language: String,
    /// Refresh token stored inline (plaintext — keyring is preferred).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Name of an environment variable holding the refresh token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token_env: Option<String>,
    /// Per-profile request timeout override in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("failed to write configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize configuration: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("keyring access failed: {message}")]
    Keyring { message: String },

    #[error("no refresh token configured for profile '{profile}'")]
    NoRefreshToken { profile: String },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Loading and saving ──────────────────────────────────────────────

/// Path of the user's config file (`~/.config/lidly/config.toml` on
/// Linux, platform-appropriate elsewhere).
pub fn config_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "lidly")
        .map_or_else(|| PathBuf::from("lidly.toml"), |dirs| {
            dirs.config_dir().join("config.toml")
        })
}

/// Load configuration from an explicit file path plus the env overlay.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("LIDLY_").split("__"))
        .extract()?;
    Ok(config)
}

/// Load configuration from the default path.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load configuration, falling back to an empty default when the file is
/// missing or unreadable.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Write configuration to an explicit path, creating parent directories.
pub fn save_config_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let rendered = toml::to_string_pretty(config)?;
    std::fs::write(path, rendered)?;
    Ok(())
}

/// Write configuration to the default path.
pub fn save_config(config: &Config) -> Result<(), ConfigError> {
    save_config_to(config, &config_path())
}

// ── Refresh token resolution ────────────────────────────────────────

/// Resolve the refresh token for a profile.
///
/// Priority: inline config value, then the environment variable named by
/// `refresh_token_env`, then the system keyring entry
/// `lidly/{profile}.refresh_token`.
pub fn resolve_refresh_token(
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    if let Some(ref token) = profile.refresh_token {
        return Ok(SecretString::from(token.clone()));
    }

    if let Some(ref var) = profile.refresh_token_env {
        if let Ok(value) = std::env::var(var) {
            if !value.is_empty() {
                return Ok(SecretString::from(value));
            }
        }
    }

    let entry = keyring::Entry::new(KEYRING_SERVICE, &keyring_key(profile_name)).map_err(|e| {
        ConfigError::Keyring {
            message: e.to_string(),
        }
    })?;
    match entry.get_password() {
        Ok(token) => Ok(SecretString::from(token)),
        Err(keyring::Error::NoEntry) => Err(ConfigError::NoRefreshToken {
            profile: profile_name.to_owned(),
        }),
        Err(e) => Err(ConfigError::Keyring {
            message: e.to_string(),
        }),
    }
}

/// Store a refresh token in the system keyring for a profile.
pub fn store_refresh_token(profile_name: &str, token: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &keyring_key(profile_name)).map_err(|e| {
        ConfigError::Keyring {
            message: e.to_string(),
        }
    })?;
    entry.set_password(token).map_err(|e| ConfigError::Keyring {
        message: e.to_string(),
    })
}

fn keyring_key(profile_name: &str) -> String {
    format!("{profile_name}.refresh_token")
}

// ── Tests ───────────────────────────────────────────────────────────
