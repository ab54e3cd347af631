//! CLI configuration — thin wrapper around `lidly_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--country, --refresh-token, ...).

use std::time::Duration;

use secrecy::SecretString;

use lidly_api::{Credentials, TransportConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use lidly_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, save_config,
    store_refresh_token,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Translate a `Profile` + global flags into client credentials and
/// transport settings. CLI flag overrides take priority over profile
/// values.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<(Credentials, TransportConfig), CliError> {
    let refresh_token = resolve_refresh_token_with_flag(profile, profile_name, global)?;

    let country = global.country.as_deref().unwrap_or(&profile.country);
    let language = global.language.as_deref().unwrap_or(&profile.language);
    validate_country(country)?;

    let timeout = profile.timeout.unwrap_or(global.timeout);

    Ok((
        Credentials {
            refresh_token,
            country: country.to_owned(),
            language: language.to_owned(),
        },
        TransportConfig {
            timeout: Duration::from_secs(timeout),
        },
    ))
}

/// Build credentials from CLI flags / env vars alone (no profile).
pub fn resolve_from_flags(global: &GlobalOpts) -> Result<(Credentials, TransportConfig), CliError> {
    let country = global.country.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    validate_country(country)?;

    // Without a profile the language defaults to the country's own
    // locale, e.g. ES -> es-ES.
    let language = global
        .language
        .clone()
        .unwrap_or_else(|| format!("{}-{country}", country.to_ascii_lowercase()));

    let refresh_token = global
        .refresh_token
        .clone()
        .map(SecretString::from)
        .ok_or_else(|| CliError::NoCredentials {
            profile: "default".into(),
        })?;

    Ok((
        Credentials {
            refresh_token,
            country: country.to_owned(),
            language,
        },
        TransportConfig {
            timeout: Duration::from_secs(global.timeout),
        },
    ))
}

/// Resolve the refresh token with CLI flag override, then fall through to
/// shared resolution (inline config, env var, keyring).
fn resolve_refresh_token_with_flag(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<SecretString, CliError> {
    if let Some(ref token) = global.refresh_token {
        return Ok(SecretString::from(token.clone()));
    }
    Ok(lidly_config::resolve_refresh_token(profile, profile_name)?)
}

fn validate_country(country: &str) -> Result<(), CliError> {
    if country.len() == 2 && country.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(CliError::Validation {
            field: "country".into(),
            reason: format!("expected a two-letter uppercase country code, got '{country}'"),
        })
    }
}
