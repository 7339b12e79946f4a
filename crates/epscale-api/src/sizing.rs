// Hand-crafted async HTTP client for the sizing report/usage API.
//
// Auth: id token in the Authorization header (no scheme prefix).

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use epscale_core::{CalculationResult, DeviceCategory};

use crate::Error;
use crate::types::{AiAnalysis, UsagePage, UsageRecord, UsageStats};

// ── Error response shape from the API gateway ────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
}

// ── Request body for the analyze endpoint ────────────────────────────

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    devices: &'a [DeviceCategory],
    results: &'a CalculationResult,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the report-generation and admin usage-log endpoints.
///
/// Sends the caller's id token verbatim in the `Authorization` header on
/// every request; token refresh is the caller's concern.
pub struct SizingClient {
    http: reqwest::Client,
    base_url: Url,
}

impl SizingClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an id token and transport config.
    ///
    /// Injects `Authorization` as a sensitive default header.
    pub fn from_token(
        base_url: &str,
        id_token: &secrecy::SecretString,
        transport: &crate::TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut token_value = HeaderValue::from_str(id_token.expose_secret()).map_err(|e| {
            Error::Authentication {
                message: format!("invalid token header value: {e}"),
            }
        })?;
        token_value.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, token_value);

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Parse the base URL and guarantee a trailing slash so joins work.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// Join a relative path (e.g. `"admin/usage"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview = &body[..body.len().min(200)];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::SessionExpired;
        }
        if status == reqwest::StatusCode::FORBIDDEN {
            return Error::AdminRequired;
        }

        let raw = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|e| e.error)
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                }
            });

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Report generation ────────────────────────────────────────────

    /// Request a narrative sizing report for the given inventory and
    /// estimator output.
    pub async fn analyze(
        &self,
        devices: &[DeviceCategory],
        results: &CalculationResult,
    ) -> Result<AiAnalysis, Error> {
        self.post("analyze", &AnalyzeRequest { devices, results })
            .await
    }

    // ── Admin usage log ──────────────────────────────────────────────

    /// Fetch one page of the usage log.
    pub async fn usage_page(
        &self,
        limit: u32,
        last_key: Option<&str>,
    ) -> Result<UsagePage, Error> {
        let mut params = vec![("limit", limit.to_string())];
        if let Some(key) = last_key {
            params.push(("lastKey", key.to_owned()));
        }
        self.get_with_params("admin/usage", &params).await
    }

    /// Follow continuation keys until the log is exhausted.
    ///
    /// Returns all records plus the stats block from the final page.
    pub async fn usage_all(&self, limit: u32) -> Result<(Vec<UsageRecord>, UsageStats), Error> {
        let mut all = Vec::new();
        let mut last_key: Option<String> = None;

        loop {
            let page = self.usage_page(limit, last_key.as_deref()).await?;
            all.extend(page.items);

            match page.last_evaluated_key {
                Some(key) => last_key = Some(key),
                None => return Ok((all, page.stats)),
            }
        }
    }
}
