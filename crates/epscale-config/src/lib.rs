//! Shared configuration for the epscale CLI.
//!
//! TOML profiles, credential resolution (keyring + env + plaintext), and
//! inventory-file persistence. The CLI adds flag-aware wrappers on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use epscale_core::Inventory;

/// Keyring service name for stored credentials.
pub const KEYRING_SERVICE: &str = "epscale";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials for profile '{profile}' -- run `epscale auth login` first")]
    NoCredentials { profile: String },

    #[error("keyring access failed: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("failed to parse {path}: {source}")]
    InventoryParse {
        path: String,
        #[source]
        source: Box<toml::de::Error>,
    },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named API profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named API profile.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Sizing API base URL (e.g., "https://api.example.com/prod").
    pub endpoint: String,

    /// Identity-pool region for `auth` commands (e.g., "eu-west-1").
    pub region: Option<String>,

    /// Identity-pool app client id for `auth` commands.
    pub client_id: Option<String>,

    /// Registered account email; remembered by `auth login`.
    pub email: Option<String>,

    /// Id token (plaintext — prefer keyring or env var).
    pub token: Option<String>,

    /// Environment variable name containing the id token.
    pub token_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Accept invalid TLS certificates.
    pub insecure: Option<bool>,

    /// Override timeout in seconds.
    pub timeout: Option<u64>,
}

// ── Config file paths ───────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "epscale", "epscale")
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("epscale");
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Resolve the inventory file path next to the config file.
pub fn inventory_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("inventory.toml"),
        |dirs| dirs.config_dir().join("inventory.toml"),
    )
}

// ── Config loading / saving ─────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("EPSCALE_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Inventory persistence ───────────────────────────────────────────

/// Load an inventory from the given file, or the seed catalog when the
/// file does not exist yet.
pub fn load_inventory(path: &Path) -> Result<Inventory, ConfigError> {
    if !path.exists() {
        return Ok(Inventory::default());
    }
    let raw = std::fs::read_to_string(path)?;
    toml::from_str(&raw).map_err(|e| ConfigError::InventoryParse {
        path: path.display().to_string(),
        source: Box::new(e),
    })
}

/// Write the inventory to the given file, creating parent directories.
pub fn save_inventory(path: &Path, inventory: &Inventory) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(inventory)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

fn keyring_entry(profile_name: &str, slot: &str) -> Result<keyring::Entry, keyring::Error> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/{slot}"))
}

/// Resolve the id token from the credential chain.
///
/// Order: profile's `token_env` env var, system keyring, plaintext config.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    if let Ok(entry) = keyring_entry(profile_name, "id-token") {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    if let Some(ref token) = profile.token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Resolve the stored refresh token, if any.
pub fn resolve_refresh_token(profile_name: &str) -> Option<SecretString> {
    keyring_entry(profile_name, "refresh-token")
        .and_then(|entry| entry.get_password())
        .map(SecretString::from)
        .ok()
}

/// Store id and refresh tokens in the system keyring.
pub fn store_tokens(
    profile_name: &str,
    id_token: &str,
    refresh_token: Option<&str>,
) -> Result<(), ConfigError> {
    keyring_entry(profile_name, "id-token")?.set_password(id_token)?;
    if let Some(refresh) = refresh_token {
        keyring_entry(profile_name, "refresh-token")?.set_password(refresh)?;
    }
    Ok(())
}

/// Remove any stored tokens for the profile. Missing entries are fine.
pub fn clear_tokens(profile_name: &str) {
    for slot in ["id-token", "refresh-token"] {
        if let Ok(entry) = keyring_entry(profile_name, slot) {
            let _ = entry.delete_credential();
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]

    use pretty_assertions::assert_eq;

    use super::{Config, load_inventory, save_inventory};
    use epscale_core::Inventory;

    #[test]
    fn default_config_round_trips_through_toml() {
        let cfg = Config::default();
        let raw = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&raw).unwrap();

        assert_eq!(back.default_profile.as_deref(), Some("default"));
        assert_eq!(back.defaults.output, "table");
        assert_eq!(back.defaults.timeout, 30);
    }

    #[test]
    fn missing_inventory_file_seeds_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.toml");

        let inv = load_inventory(&path).unwrap();
        assert_eq!(inv.categories.len(), 8);
    }

    #[test]
    fn inventory_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("inventory.toml");

        let mut inv = Inventory::default();
        inv.set_count("fw", 9).unwrap();
        inv.set_multiplier(1.5);
        save_inventory(&path, &inv).unwrap();

        let back = load_inventory(&path).unwrap();
        assert_eq!(back.get("fw").unwrap().count, 9);
        assert_eq!(back.multiplier.value(), 1.5);
    }

    #[test]
    fn malformed_inventory_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.toml");
        std::fs::write(&path, "multiplier = \"not a number\"").unwrap();

        let err = load_inventory(&path).unwrap_err();
        assert!(err.to_string().contains("inventory.toml"));
    }
}
