//! Domain model and estimator for OT SOC log-ingestion sizing.
//!
//! This crate owns everything that can be computed without touching the
//! network:
//!
//! - **Domain model** ([`model`]) — [`DeviceCategory`] rows, the fixed
//!   [`DeviceType`] / [`LogSourceType`] enumerations, and the clamped
//!   [`TrafficMultiplier`] scalar.
//!
//! - **[`estimate`]** — the pure EPS/storage calculation: aggregate
//!   events-per-second, per-type breakdown, and projected daily/monthly
//!   storage volume. Total, deterministic, no side effects.
//!
//! - **[`Inventory`]** — the editable device list plus global multiplier,
//!   seeded from the built-in catalog. Mutators enforce the non-negativity
//!   invariants and re-seed per-unit rates from the recommendation table
//!   when a category's log source changes.
//!
//! - **Recommendation table** ([`recommended_eps`]) — static
//!   `(DeviceType, LogSourceType)` → default per-unit EPS lookup.

pub mod catalog;
pub mod error;
pub mod estimator;
pub mod inventory;
pub mod model;

// ── Primary re-exports ──────────────────────────────────────────────
pub use catalog::{default_catalog, recommended_eps};
pub use error::Error;
pub use estimator::{
    BYTES_PER_LOG, CalculationResult, SECONDS_PER_DAY, TypeBreakdown, estimate,
};
pub use inventory::Inventory;
pub use model::{DeviceCategory, DeviceType, LogSourceType, TrafficMultiplier};
