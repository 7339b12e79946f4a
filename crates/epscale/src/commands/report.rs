//! Report command handler: send the inventory and estimate to the API
//! and render the returned narrative analysis.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use epscale_api::{AiAnalysis, SizingClient};

use crate::cli::{GlobalOpts, ReportArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(args: ReportArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut inventory = util::load_inventory(global)?;
    if let Some(multiplier) = args.multiplier {
        inventory.set_multiplier(multiplier);
    }
    let result = inventory.estimate();

    let api = config::resolve_api(global)?;
    let client = SizingClient::from_token(&api.endpoint, &api.token, &api.transport)?;

    let spinner = start_spinner(global);
    let outcome = client.analyze(&inventory.categories, &result).await;
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    let analysis = outcome?;

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &analysis,
        |a| format_analysis(a, color),
        |a| a.summary.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Spinner on stderr while the report generates; skipped when quiet or
/// not attached to a terminal.
fn start_spinner(global: &GlobalOpts) -> Option<ProgressBar> {
    if global.quiet || !std::io::stderr().is_terminal() {
        return None;
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::with_template("{spinner} {msg}").expect("static template"));
    bar.set_message("Generating sizing report...");
    bar.enable_steady_tick(Duration::from_millis(100));
    Some(bar)
}

fn header(text: &str, color: bool) -> String {
    if color {
        text.bold().underline().to_string()
    } else {
        text.to_owned()
    }
}

fn format_analysis(analysis: &AiAnalysis, color: bool) -> String {
    let mut out = String::new();

    out.push_str(&header("Summary", color));
    out.push_str("\n\n");
    out.push_str(&analysis.summary);
    out.push_str("\n\n");

    out.push_str(&header("Risk Assessment", color));
    out.push_str("\n\n");
    out.push_str(&analysis.risk_assessment);
    out.push_str("\n\n");

    out.push_str(&header("Storage Strategy", color));
    out.push_str("\n\n");
    out.push_str(&analysis.storage_strategy);
    out.push_str("\n\n");

    out.push_str(&header("Key Recommendations", color));
    out.push('\n');
    for (i, recommendation) in analysis.key_recommendations.iter().enumerate() {
        out.push_str(&format!("\n{:>2}. {recommendation}", i + 1));
    }

    out
}
