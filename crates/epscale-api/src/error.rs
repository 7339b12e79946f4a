use thiserror::Error;

/// Top-level error type for the `epscale-api` crate.
///
/// Covers both API surfaces: the sizing report/usage API and the identity
/// provider. The CLI maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Sign-in failed (wrong credentials, unconfirmed account, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The bearer credential was rejected (expired or revoked id token).
    #[error("Session expired -- sign in again")]
    SessionExpired,

    /// The usage log requires administrator privileges.
    #[error("Access denied -- admin privileges required")]
    AdminRequired,

    /// Account exists but has not confirmed its verification code.
    #[error("Account not confirmed -- check your email for the verification code")]
    NotConfirmed,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Sizing API ──────────────────────────────────────────────────
    /// Structured error from the sizing API (parsed from the `{error}` body).
    #[error("API error (HTTP {status}): {message}")]
    Api { message: String, status: u16 },

    // ── Identity provider ───────────────────────────────────────────
    /// Structured error from the identity provider.
    #[error("Identity provider error ({code}): {message}")]
    Identity { code: String, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error indicates the credential has expired
    /// and re-authentication might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::SessionExpired | Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => matches!(status, 429 | 502 | 503 | 504),
            _ => false,
        }
    }
}
