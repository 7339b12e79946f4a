// Client for the managed identity provider (Cognito user-pool wire
// protocol, application/x-amz-json-1.1).
//
// All cryptographic and session logic lives server-side; this client only
// exchanges credentials for tokens and relays registration calls.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::types::{AuthTokens, SignUpAttributes};

const TARGET_PREFIX: &str = "AWSCognitoIdentityProviderService";
const AMZ_JSON: &str = "application/x-amz-json-1.1";

// ── Wire shapes ──────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ProviderError {
    #[serde(rename = "__type", default)]
    kind: Option<String>,
    #[serde(default, alias = "Message")]
    message: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthenticationResult {
    id_token: String,
    access_token: String,
    refresh_token: Option<String>,
    expires_in: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthResponse {
    authentication_result: Option<AuthenticationResult>,
    challenge_name: Option<String>,
}

#[derive(Deserialize)]
struct SignUpResponse {
    #[serde(rename = "UserConfirmed", default)]
    user_confirmed: bool,
}

#[derive(Deserialize)]
struct Empty {}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the identity provider's user-pool API.
pub struct IdentityClient {
    http: reqwest::Client,
    endpoint: Url,
    client_id: String,
}

impl IdentityClient {
    /// Build for a regional endpoint (`https://cognito-idp.{region}.amazonaws.com/`).
    pub fn new(
        region: &str,
        client_id: &str,
        transport: &crate::TransportConfig,
    ) -> Result<Self, Error> {
        let endpoint = Url::parse(&format!("https://cognito-idp.{region}.amazonaws.com/"))?;
        Ok(Self {
            http: transport.build_client()?,
            endpoint,
            client_id: client_id.to_owned(),
        })
    }

    /// Build against an explicit endpoint URL (self-hosted or test doubles).
    pub fn with_endpoint(
        endpoint: &str,
        client_id: &str,
        transport: &crate::TransportConfig,
    ) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
            endpoint: Url::parse(endpoint)?,
            client_id: client_id.to_owned(),
        })
    }

    // ── Request plumbing ─────────────────────────────────────────────

    async fn call<T: DeserializeOwned>(
        &self,
        operation: &str,
        body: serde_json::Value,
    ) -> Result<T, Error> {
        debug!("POST {} target={operation}", self.endpoint);

        let resp = self
            .http
            .post(self.endpoint.clone())
            .header("Content-Type", AMZ_JSON)
            .header("X-Amz-Target", format!("{TARGET_PREFIX}.{operation}"))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let raw = resp.text().await?;

        if status.is_success() {
            serde_json::from_str(&raw).map_err(|e| {
                let preview = &raw[..raw.len().min(200)];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body: raw,
                }
            })
        } else {
            Err(Self::parse_error(&raw, status.as_u16()))
        }
    }

    fn parse_error(raw: &str, status: u16) -> Error {
        let Ok(err) = serde_json::from_str::<ProviderError>(raw) else {
            return Error::Identity {
                code: format!("HTTP{status}"),
                message: raw.to_owned(),
            };
        };

        // Error type arrives namespaced ("co.aws...#NotAuthorizedException"
        // on some stacks, bare on others); keep the final segment.
        let code = err
            .kind
            .as_deref()
            .map(|k| k.rsplit('#').next().unwrap_or(k).to_owned())
            .unwrap_or_else(|| format!("HTTP{status}"));
        let message = err.message.unwrap_or_else(|| code.clone());

        match code.as_str() {
            "NotAuthorizedException" | "UserNotFoundException" => {
                Error::Authentication { message }
            }
            "UserNotConfirmedException" => Error::NotConfirmed,
            _ => Error::Identity { code, message },
        }
    }

    fn tokens_from(response: InitiateAuthResponse) -> Result<AuthTokens, Error> {
        if let Some(challenge) = response.challenge_name {
            return Err(Error::Authentication {
                message: format!("unsupported auth challenge: {challenge}"),
            });
        }
        let result = response
            .authentication_result
            .ok_or_else(|| Error::Authentication {
                message: "no tokens in sign-in response".to_owned(),
            })?;

        Ok(AuthTokens {
            id_token: SecretString::from(result.id_token),
            access_token: SecretString::from(result.access_token),
            refresh_token: result.refresh_token.map(SecretString::from),
            expires_in_secs: result.expires_in,
        })
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Register a new account. Returns `true` if the account is already
    /// confirmed (no verification code round-trip needed).
    pub async fn sign_up(
        &self,
        attributes: &SignUpAttributes,
        password: &SecretString,
    ) -> Result<bool, Error> {
        let body = serde_json::json!({
            "ClientId": self.client_id,
            "Username": attributes.email,
            "Password": password.expose_secret(),
            "UserAttributes": [
                { "Name": "email", "Value": attributes.email },
                { "Name": "given_name", "Value": attributes.given_name },
                { "Name": "family_name", "Value": attributes.family_name },
                { "Name": "custom:company", "Value": attributes.company },
                { "Name": "custom:title", "Value": attributes.title },
            ],
        });

        let resp: SignUpResponse = self.call("SignUp", body).await?;
        Ok(resp.user_confirmed)
    }

    /// Confirm a registration with the emailed verification code.
    pub async fn confirm_sign_up(&self, email: &str, code: &str) -> Result<(), Error> {
        let body = serde_json::json!({
            "ClientId": self.client_id,
            "Username": email,
            "ConfirmationCode": code,
        });

        let _: Empty = self.call("ConfirmSignUp", body).await?;
        Ok(())
    }

    /// Exchange email + password for a token set.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthTokens, Error> {
        let body = serde_json::json!({
            "ClientId": self.client_id,
            "AuthFlow": "USER_PASSWORD_AUTH",
            "AuthParameters": {
                "USERNAME": email,
                "PASSWORD": password.expose_secret(),
            },
        });

        let resp: InitiateAuthResponse = self.call("InitiateAuth", body).await?;
        Self::tokens_from(resp)
    }

    /// Mint a fresh id/access token pair from a refresh token.
    pub async fn refresh(&self, refresh_token: &SecretString) -> Result<AuthTokens, Error> {
        let body = serde_json::json!({
            "ClientId": self.client_id,
            "AuthFlow": "REFRESH_TOKEN_AUTH",
            "AuthParameters": {
                "REFRESH_TOKEN": refresh_token.expose_secret(),
            },
        });

        let resp: InitiateAuthResponse = self.call("InitiateAuth", body).await?;
        Self::tokens_from(resp)
    }
}
