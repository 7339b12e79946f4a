//! Wire types for the sizing API and identity provider.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

// ── Sizing API ──────────────────────────────────────────────────────

/// Narrative report returned by the analyze endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    /// Executive summary of the infrastructure sizing.
    pub summary: String,
    /// Visibility-gap analysis based on the device mix.
    pub risk_assessment: String,
    /// Hot/warm/cold retention recommendations for the calculated volume.
    pub storage_strategy: String,
    /// Ordered, actionable recommendations for the SOC implementation.
    pub key_recommendations: Vec<String>,
}

/// One audit-log entry for a past report request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    pub email: String,
    pub timestamp: DateTime<Utc>,
    pub company: String,
    pub title: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    /// Monetary cost of the request, in USD.
    pub cost: f64,
    pub total_eps: f64,
    pub device_count: u32,
}

/// Aggregate statistics across the whole usage log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    pub total_cost: f64,
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
    pub record_count: u64,
}

/// One page of the usage log plus the continuation key for the next page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsagePage {
    pub items: Vec<UsageRecord>,
    pub stats: UsageStats,
    /// Opaque continuation key; `None` when this is the last page.
    pub last_evaluated_key: Option<String>,
}

// ── Identity provider ───────────────────────────────────────────────

/// Token set issued by the identity provider on sign-in or refresh.
#[derive(Debug)]
pub struct AuthTokens {
    /// JWT sent in the `Authorization` header of API requests.
    pub id_token: SecretString,
    pub access_token: SecretString,
    /// Absent on refresh responses — the original refresh token stays valid.
    pub refresh_token: Option<SecretString>,
    pub expires_in_secs: u64,
}

/// Profile attributes captured at registration.
#[derive(Debug, Clone)]
pub struct SignUpAttributes {
    pub email: String,
    pub given_name: String,
    pub family_name: String,
    pub company: String,
    pub title: String,
}
