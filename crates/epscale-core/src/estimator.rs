//! The EPS/storage estimator.
//!
//! A pure, synchronous function of the device list and global multiplier.
//! Consumers re-run it on every input change; there is no internal state.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::model::{DeviceCategory, DeviceType, TrafficMultiplier};

/// Average log record size used for storage projection, in bytes.
pub const BYTES_PER_LOG: f64 = 650.0;

/// Seconds per day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

const BYTES_PER_GIB: f64 = 1_073_741_824.0;
const DAYS_PER_MONTH: f64 = 30.0;
const GIB_PER_TIB: f64 = 1_024.0;

/// Summed EPS and percentage share for one device type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeBreakdown {
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub eps: f64,
    /// Share of the total, in percent. Zero when the total is zero.
    pub percentage: f64,
}

/// Derived sizing result. Recomputed from scratch on every input change,
/// never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub total_eps: f64,
    #[serde(rename = "dailyLogsGB")]
    pub daily_logs_gb: f64,
    #[serde(rename = "monthlyLogsTB")]
    pub monthly_logs_tb: f64,
    /// One entry per [`DeviceType`] variant, sorted descending by EPS.
    /// Ties keep enumeration-declaration order.
    pub breakdown: Vec<TypeBreakdown>,
}

/// Compute aggregate EPS, the per-type breakdown, and projected storage.
///
/// Total over all inputs: an empty device list or all-zero counts yield a
/// well-defined zero result (no division by zero in the percentages).
pub fn estimate(devices: &[DeviceCategory], multiplier: TrafficMultiplier) -> CalculationResult {
    let total_eps: f64 = devices.iter().map(|d| d.eps(multiplier)).sum();

    // One entry per enumeration variant, even when no category matches.
    let mut breakdown: Vec<TypeBreakdown> = DeviceType::iter()
        .map(|device_type| {
            let eps: f64 = devices
                .iter()
                .filter(|d| d.device_type == device_type)
                .map(|d| d.eps(multiplier))
                .sum();
            let percentage = if total_eps > 0.0 {
                eps / total_eps * 100.0
            } else {
                0.0
            };
            TypeBreakdown {
                device_type,
                eps,
                percentage,
            }
        })
        .collect();

    // Stable sort: equal-EPS entries keep declaration order.
    breakdown.sort_by(|a, b| b.eps.total_cmp(&a.eps));

    let daily_bytes = total_eps * SECONDS_PER_DAY * BYTES_PER_LOG;
    let daily_logs_gb = daily_bytes / BYTES_PER_GIB;
    let monthly_logs_tb = daily_logs_gb * DAYS_PER_MONTH / GIB_PER_TIB;

    CalculationResult {
        total_eps,
        daily_logs_gb,
        monthly_logs_tb,
        breakdown,
    }
}
