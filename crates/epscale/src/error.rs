//! CLI error types with miette diagnostics.
//!
//! Maps `epscale_api::Error` and config failures into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use epscale_config::ConfigError;

/// Exit codes per the CLI spec.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the API at {url}")]
    #[diagnostic(
        code(epscale::connection_failed),
        help(
            "Check the endpoint URL and your network connection.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS error: {message}")]
    #[diagnostic(
        code(epscale::tls_error),
        help("Use --insecure (-k) for self-signed gateways, or configure ca_cert in your profile.")
    )]
    TlsError { message: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(epscale::auth_failed),
        help("Verify your email and password, then retry: epscale auth login")
    )]
    AuthFailed { message: String },

    #[error("Session expired")]
    #[diagnostic(
        code(epscale::session_expired),
        help("Sign in again with: epscale auth login")
    )]
    SessionExpired,

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(epscale::no_credentials),
        help(
            "Sign in with: epscale auth login\n\
             Or set the EPSCALE_TOKEN environment variable."
        )
    )]
    NoCredentials { profile: String },

    #[error("Account not confirmed")]
    #[diagnostic(
        code(epscale::not_confirmed),
        help("Check your email for the verification code, then run:\n\
              epscale auth confirm <email> <code>")
    )]
    NotConfirmed,

    #[error("Access denied -- admin privileges required")]
    #[diagnostic(code(epscale::admin_required))]
    AdminRequired,

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(epscale::not_found),
        help("Run: epscale {list_command} to see available entries")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{resource_type} '{identifier}' already exists")]
    #[diagnostic(code(epscale::conflict))]
    Conflict {
        resource_type: String,
        identifier: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(epscale::api_error))]
    ApiError { status: u16, message: String },

    #[error("Unexpected API response: {message}")]
    #[diagnostic(code(epscale::bad_response))]
    BadResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(epscale::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(epscale::profile_not_found),
        help("Create one with: epscale config init")
    )]
    ProfileNotFound { name: String },

    #[error("No API endpoint configured")]
    #[diagnostic(
        code(epscale::no_endpoint),
        help(
            "Run: epscale config init\n\
             Or pass --endpoint / set EPSCALE_ENDPOINT.\n\
             Config expected at: {path}"
        )
    )]
    NoEndpoint { path: String },

    #[error(transparent)]
    #[diagnostic(code(epscale::config))]
    Config(Box<figment::Error>),

    // ── Timeout ──────────────────────────────────────────────────────

    #[error("Request timed out")]
    #[diagnostic(
        code(epscale::timeout),
        help("Increase timeout with --timeout or check the API's responsiveness.")
    )]
    Timeout,

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(epscale::json))]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. }
            | Self::SessionExpired
            | Self::NoCredentials { .. }
            | Self::NotConfirmed => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::AdminRequired => exit_code::PERMISSION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::Conflict { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Upstream error mappings ──────────────────────────────────────────

impl From<epscale_api::Error> for CliError {
    fn from(err: epscale_api::Error) -> Self {
        match err {
            epscale_api::Error::Authentication { message } => Self::AuthFailed { message },
            epscale_api::Error::SessionExpired => Self::SessionExpired,
            epscale_api::Error::AdminRequired => Self::AdminRequired,
            epscale_api::Error::NotConfirmed => Self::NotConfirmed,

            epscale_api::Error::Transport(e) => {
                if e.is_timeout() {
                    Self::Timeout
                } else {
                    Self::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "(unknown)".into(), ToString::to_string),
                        source: e.into(),
                    }
                }
            }

            epscale_api::Error::InvalidUrl(e) => Self::Validation {
                field: "endpoint".into(),
                reason: e.to_string(),
            },

            epscale_api::Error::Tls(message) => Self::TlsError { message },

            epscale_api::Error::Api { status, message } => Self::ApiError { status, message },

            epscale_api::Error::Identity { code, message } => Self::ApiError {
                status: 0,
                message: format!("{code}: {message}"),
            },

            epscale_api::Error::Deserialization { message, .. } => Self::BadResponse { message },
        }
    }
}

impl From<epscale_core::Error> for CliError {
    fn from(err: epscale_core::Error) -> Self {
        match err {
            epscale_core::Error::CategoryNotFound { id } => Self::NotFound {
                resource_type: "device category".into(),
                identifier: id,
                list_command: "devices list".into(),
            },
            epscale_core::Error::DuplicateCategory { id } => Self::Conflict {
                resource_type: "device category".into(),
                identifier: id,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Figment(e) => Self::Config(e),
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Validation {
                field: "config".into(),
                reason: other.to_string(),
            },
        }
    }
}
