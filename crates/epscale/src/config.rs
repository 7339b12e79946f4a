//! CLI configuration — thin wrapper around `epscale_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--endpoint, --token, etc.).

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use epscale_api::{TlsMode, TransportConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use epscale_config::{
    Config, Defaults, Profile, config_path, inventory_path, load_config_or_default, save_config,
};

// ── Resolved targets ────────────────────────────────────────────────

/// Everything needed to talk to the sizing API.
pub struct ApiTarget {
    pub endpoint: String,
    pub token: SecretString,
    pub transport: TransportConfig,
    pub profile_name: String,
}

/// Everything needed to talk to the identity provider.
pub struct IdentityTarget {
    pub region: String,
    pub client_id: String,
    pub transport: TransportConfig,
    pub profile_name: String,
    /// Remembered account email, used as the login prompt default.
    pub email: Option<String>,
}

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Resolve the inventory file path (flag > env > platform default).
pub fn inventory_file(global: &GlobalOpts) -> PathBuf {
    global.inventory.clone().unwrap_or_else(inventory_path)
}

/// Translate profile + global flags into an API target.
///
/// CLI flag overrides take priority over profile values; the token comes
/// from the flag, then the profile's credential chain (env var, keyring,
/// plaintext).
pub fn resolve_api(global: &GlobalOpts) -> Result<ApiTarget, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);
    let profile = cfg.profiles.get(&profile_name);

    // 1. Endpoint (flag > env > profile)
    let endpoint = global
        .endpoint
        .clone()
        .or_else(|| {
            profile
                .map(|p| p.endpoint.clone())
                .filter(|e| !e.is_empty())
        })
        .ok_or_else(|| CliError::NoEndpoint {
            path: config_path().display().to_string(),
        })?;

    // 2. Id token (flag > credential chain)
    let token = if let Some(ref raw) = global.token {
        SecretString::from(raw.clone())
    } else {
        let profile = profile.ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.clone(),
        })?;
        epscale_config::resolve_token(profile, &profile_name)?
    };

    Ok(ApiTarget {
        endpoint,
        token,
        transport: transport_for(profile, global),
        profile_name,
    })
}

/// Resolve identity-provider settings for `auth` commands.
///
/// These live only in the profile; there are no flag overrides.
pub fn resolve_identity(global: &GlobalOpts) -> Result<IdentityTarget, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);
    let profile = cfg
        .profiles
        .get(&profile_name)
        .ok_or_else(|| CliError::ProfileNotFound {
            name: profile_name.clone(),
        })?;

    let region = profile
        .region
        .clone()
        .ok_or_else(|| CliError::Validation {
            field: "region".into(),
            reason: format!(
                "profile '{profile_name}' has no region; run `epscale config init`"
            ),
        })?;

    let client_id = profile
        .client_id
        .clone()
        .ok_or_else(|| CliError::Validation {
            field: "client_id".into(),
            reason: format!(
                "profile '{profile_name}' has no client_id; run `epscale config init`"
            ),
        })?;

    Ok(IdentityTarget {
        region,
        client_id,
        transport: transport_for(Some(profile), global),
        profile_name,
        email: profile.email.clone(),
    })
}

/// Build a transport config from profile values and global flags.
pub fn transport_for(profile: Option<&Profile>, global: &GlobalOpts) -> TransportConfig {
    let tls = if global.insecure || profile.and_then(|p| p.insecure).unwrap_or(false) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ca) = profile.and_then(|p| p.ca_cert.clone()) {
        TlsMode::CustomCa(ca)
    } else {
        TlsMode::System
    };

    let timeout = global
        .timeout
        .or_else(|| profile.and_then(|p| p.timeout))
        .unwrap_or(30);

    TransportConfig {
        tls,
        timeout: Duration::from_secs(timeout),
    }
}
