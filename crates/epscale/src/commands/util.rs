//! Shared helpers for command handlers.

use epscale_core::{CalculationResult, DeviceType, Inventory, LogSourceType};

use crate::cli::{DeviceClass, GlobalOpts, LogSource};
use crate::config;
use crate::error::CliError;

// ── Inventory file plumbing ─────────────────────────────────────────

/// Load the inventory from the resolved file, seeding defaults when the
/// file does not exist yet.
pub fn load_inventory(global: &GlobalOpts) -> Result<Inventory, CliError> {
    let path = config::inventory_file(global);
    Ok(epscale_config::load_inventory(&path)?)
}

/// Persist the inventory back to the resolved file.
pub fn save_inventory(global: &GlobalOpts, inventory: &Inventory) -> Result<(), CliError> {
    let path = config::inventory_file(global);
    epscale_config::save_inventory(&path, inventory)?;
    Ok(())
}

/// Recompute and print the headline totals after an inventory change.
pub fn print_totals(inventory: &Inventory, global: &GlobalOpts) {
    if global.quiet {
        return;
    }
    let result = inventory.estimate();
    eprintln!(
        "Total: {} EPS | {} GB/day | {} TB/month",
        fmt_num(result.total_eps),
        fmt_num(result.daily_logs_gb),
        fmt_num(result.monthly_logs_tb),
    );
}

// ── Value-enum translation ──────────────────────────────────────────

/// Map the CLI device class onto the domain enumeration.
pub fn device_type(class: DeviceClass) -> DeviceType {
    match class {
        DeviceClass::Network => DeviceType::Network,
        DeviceClass::Server => DeviceType::Server,
        DeviceClass::Workstation => DeviceType::Workstation,
        DeviceClass::Controller => DeviceType::Controller,
        DeviceClass::Iot => DeviceType::Iot,
        DeviceClass::Security => DeviceType::Security,
    }
}

/// Map the CLI log source onto the domain enumeration.
pub fn log_source(source: LogSource) -> LogSourceType {
    match source {
        LogSource::Syslog => LogSourceType::Syslog,
        LogSource::Winevent => LogSourceType::WinEvent,
        LogSource::Netflow => LogSourceType::NetFlow,
        LogSource::FlatFile => LogSourceType::FlatFile,
        LogSource::Api => LogSourceType::Api,
    }
}

// ── Formatting ──────────────────────────────────────────────────────

/// Format a sizing number the way the totals panel does: two decimals,
/// trailing zeros trimmed.
pub fn fmt_num(value: f64) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() { "0".into() } else { s.to_owned() }
}

/// Multi-line detail block for the estimator output.
pub fn format_result(result: &CalculationResult) -> String {
    let mut lines = vec![
        format!("Total EPS:       {}", fmt_num(result.total_eps)),
        format!("Daily volume:    {} GB", fmt_num(result.daily_logs_gb)),
        format!("Monthly volume:  {} TB", fmt_num(result.monthly_logs_tb)),
        String::new(),
        "Breakdown by device type:".to_owned(),
    ];
    for entry in &result.breakdown {
        lines.push(format!(
            "  {:<24} {:>10} EPS  {:>5.1}%",
            entry.device_type.to_string(),
            fmt_num(entry.eps),
            entry.percentage,
        ));
    }
    lines.join("\n")
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::fmt_num;

    #[test]
    fn fmt_num_trims_trailing_zeros() {
        assert_eq!(fmt_num(5.0), "5");
        assert_eq!(fmt_num(5.24), "5.24");
        assert_eq!(fmt_num(5.2), "5.2");
        assert_eq!(fmt_num(0.0), "0");
    }

    #[test]
    fn fmt_num_rounds_to_two_decimals() {
        assert_eq!(fmt_num(0.153_6), "0.15");
        assert_eq!(fmt_num(123.456), "123.46");
    }
}
