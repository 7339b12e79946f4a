//! Admin usage-log command handler.

use serde::Serialize;
use tabled::Tabled;

use epscale_api::{SizingClient, UsageRecord, UsageStats};

use crate::cli::{GlobalOpts, UsageArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

// ── View model ──────────────────────────────────────────────────────

/// Records plus stats in one serializable unit, so structured output
/// carries the same footer data the table shows.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UsageView {
    records: Vec<UsageRecord>,
    stats: UsageStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_evaluated_key: Option<String>,
}

#[derive(Tabled)]
struct UsageRow {
    #[tabled(rename = "Time (UTC)")]
    time: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Company")]
    company: String,
    #[tabled(rename = "Devices")]
    devices: u32,
    #[tabled(rename = "EPS")]
    eps: String,
    #[tabled(rename = "Tokens in/out")]
    tokens: String,
    #[tabled(rename = "Cost")]
    cost: String,
}

impl From<&UsageRecord> for UsageRow {
    fn from(r: &UsageRecord) -> Self {
        Self {
            time: r.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            email: r.email.clone(),
            company: r.company.clone(),
            devices: r.device_count,
            eps: util::fmt_num(r.total_eps),
            tokens: format!("{}/{}", r.input_tokens, r.output_tokens),
            cost: format!("${:.4}", r.cost),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: UsageArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let api = config::resolve_api(global)?;
    let client = SizingClient::from_token(&api.endpoint, &api.token, &api.transport)?;

    let view = if args.all {
        let (records, stats) = client.usage_all(args.limit).await?;
        UsageView {
            records,
            stats,
            last_evaluated_key: None,
        }
    } else {
        let page = client
            .usage_page(args.limit, args.last_key.as_deref())
            .await?;
        UsageView {
            records: page.items,
            stats: page.stats,
            last_evaluated_key: page.last_evaluated_key,
        }
    };

    let out = output::render_single(&global.output, &view, format_view, |v| {
        v.records
            .iter()
            .map(|r| format!("{}\t{}", r.timestamp.to_rfc3339(), r.email))
            .collect::<Vec<_>>()
            .join("\n")
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

fn format_view(view: &UsageView) -> String {
    let rows: Vec<UsageRow> = view.records.iter().map(UsageRow::from).collect();
    let mut out = output::render_table(&rows);

    out.push_str(&format!(
        "\n\nRequests: {} | Cost: ${:.4} | Tokens: {} in / {} out",
        view.stats.record_count,
        view.stats.total_cost,
        view.stats.total_input_tokens,
        view.stats.total_output_tokens,
    ));

    if let Some(ref key) = view.last_evaluated_key {
        out.push_str(&format!(
            "\nMore records available; continue with --last-key {key} (or use --all)"
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::{TimeZone, Utc};

    use super::{UsageView, format_view};
    use epscale_api::{UsageRecord, UsageStats};

    fn record() -> UsageRecord {
        UsageRecord {
            email: "ops@example.com".into(),
            timestamp: Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap(),
            company: "Acme Water".into(),
            title: "SOC Lead".into(),
            input_tokens: 1_200,
            output_tokens: 340,
            cost: 0.0123,
            total_eps: 118.5,
            device_count: 8,
        }
    }

    #[test]
    fn footer_carries_stats_and_continuation_hint() {
        let view = UsageView {
            records: vec![record()],
            stats: UsageStats {
                total_cost: 0.0123,
                total_input_tokens: 1_200,
                total_output_tokens: 340,
                record_count: 1,
            },
            last_evaluated_key: Some("cursor-2".into()),
        };

        let text = format_view(&view);
        assert!(text.contains("ops@example.com"));
        assert!(text.contains("Requests: 1 | Cost: $0.0123 | Tokens: 1200 in / 340 out"));
        assert!(text.contains("--last-key cursor-2"));
    }

    #[test]
    fn final_page_has_no_continuation_hint() {
        let view = UsageView {
            records: vec![],
            stats: UsageStats {
                total_cost: 0.0,
                total_input_tokens: 0,
                total_output_tokens: 0,
                record_count: 0,
            },
            last_evaluated_key: None,
        };

        assert!(!format_view(&view).contains("--last-key"));
    }
}
