//! Auth subcommand handlers: sign-in, registration, and token storage.

use dialoguer::Input;
use secrecy::{ExposeSecret, SecretString};

use epscale_api::{IdentityClient, SignUpAttributes};
use epscale_config::KEYRING_SERVICE;

use crate::cli::{AuthArgs, AuthCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn prompt_text(prompt: &str, default: Option<String>) -> Result<String, CliError> {
    let input = Input::new().with_prompt(prompt);
    let input = match default {
        Some(value) => input.default(value),
        None => input,
    };
    input.interact_text().map_err(prompt_err)
}

fn prompt_password(prompt: &str) -> Result<SecretString, CliError> {
    let raw = rpassword::prompt_password(prompt).map_err(prompt_err)?;
    if raw.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(SecretString::from(raw))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: AuthArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        AuthCommand::Login { email } => login(email, global).await,
        AuthCommand::Logout => logout(global),
        AuthCommand::Status => status(global),
        AuthCommand::Register => register(global).await,
        AuthCommand::Confirm { email, code } => confirm(&email, &code, global).await,
    }
}

// ── Login / logout ──────────────────────────────────────────────────

async fn login(email: Option<String>, global: &GlobalOpts) -> Result<(), CliError> {
    let identity = config::resolve_identity(global)?;

    let email = match email {
        Some(e) => e,
        None => prompt_text("Email", identity.email.clone())?,
    };
    let password = prompt_password("Password: ")?;

    let client = IdentityClient::new(&identity.region, &identity.client_id, &identity.transport)?;
    let tokens = client.sign_in(&email, &password).await?;

    epscale_config::store_tokens(
        &identity.profile_name,
        tokens.id_token.expose_secret(),
        tokens
            .refresh_token
            .as_ref()
            .map(ExposeSecret::expose_secret),
    )?;

    // Remember the email so the next login can default to it.
    let mut cfg = config::load_config_or_default();
    if let Some(profile) = cfg.profiles.get_mut(&identity.profile_name) {
        if profile.email.as_deref() != Some(&email) {
            profile.email = Some(email.clone());
            config::save_config(&cfg)?;
        }
    }

    if !global.quiet {
        eprintln!(
            "Signed in as {email} (token valid for ~{} min)",
            tokens.expires_in_secs / 60
        );
    }
    Ok(())
}

fn logout(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);

    epscale_config::clear_tokens(&profile_name);
    if !global.quiet {
        eprintln!("Cleared stored tokens for profile '{profile_name}'");
    }
    Ok(())
}

// ── Status ──────────────────────────────────────────────────────────

fn status(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);
    let profile = cfg.profiles.get(&profile_name);

    println!("Profile:  {profile_name}");
    if let Some(profile) = profile {
        if !profile.endpoint.is_empty() {
            println!("Endpoint: {}", profile.endpoint);
        }
        if let Some(ref email) = profile.email {
            println!("Email:    {email}");
        }
    }
    println!("Token:    {}", token_source(global, profile, &profile_name));

    let has_refresh = epscale_config::resolve_refresh_token(&profile_name).is_some();
    println!("Refresh:  {}", if has_refresh { "stored" } else { "none" });
    Ok(())
}

/// Report where the id token would come from, mirroring the resolution
/// order used for API calls.
fn token_source(
    global: &GlobalOpts,
    profile: Option<&config::Profile>,
    profile_name: &str,
) -> String {
    if global.token.is_some() {
        return "--token flag / EPSCALE_TOKEN".into();
    }

    if let Some(profile) = profile {
        if let Some(ref env_name) = profile.token_env {
            if std::env::var(env_name).is_ok() {
                return format!("environment variable {env_name}");
            }
        }
    }

    let in_keyring = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/id-token"))
        .and_then(|entry| entry.get_password())
        .is_ok();
    if in_keyring {
        return "system keyring".into();
    }

    if profile.is_some_and(|p| p.token.is_some()) {
        return "config file (plaintext)".into();
    }

    "none -- run `epscale auth login`".into()
}

// ── Registration ────────────────────────────────────────────────────

async fn register(global: &GlobalOpts) -> Result<(), CliError> {
    let identity = config::resolve_identity(global)?;

    let email = prompt_text("Email", None)?;
    let given_name = prompt_text("First name", None)?;
    let family_name = prompt_text("Last name", None)?;
    let company = prompt_text("Company", None)?;
    let title = prompt_text("Job title", None)?;

    let password = prompt_password("Password: ")?;
    let repeat = prompt_password("Repeat password: ")?;
    if password.expose_secret() != repeat.expose_secret() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "passwords do not match".into(),
        });
    }

    let client = IdentityClient::new(&identity.region, &identity.client_id, &identity.transport)?;
    let attributes = SignUpAttributes {
        email: email.clone(),
        given_name,
        family_name,
        company,
        title,
    };
    let confirmed = client.sign_up(&attributes, &password).await?;

    if global.quiet {
        return Ok(());
    }
    if confirmed {
        eprintln!("Account ready -- sign in with: epscale auth login");
    } else {
        eprintln!("Verification code sent to {email}");
        eprintln!("Confirm with: epscale auth confirm {email} <code>");
    }
    Ok(())
}

async fn confirm(email: &str, code: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let identity = config::resolve_identity(global)?;
    let client = IdentityClient::new(&identity.region, &identity.client_id, &identity.transport)?;

    client.confirm_sign_up(email, code).await?;
    if !global.quiet {
        eprintln!("Account confirmed -- sign in with: epscale auth login");
    }
    Ok(())
}
