// ── Device inventory domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Device class used to group the EPS breakdown.
///
/// Declaration order is the canonical enumeration order: the estimator
/// produces one breakdown entry per variant in this order, and entries with
/// equal EPS keep it after sorting.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum DeviceType {
    /// Switches, routers, and other network plumbing.
    #[serde(rename = "Network Infrastructure")]
    #[strum(serialize = "Network Infrastructure", serialize = "network")]
    Network,

    /// Historians, OPC/connectivity servers, domain controllers.
    #[serde(rename = "Servers & Historians")]
    #[strum(serialize = "Servers & Historians", serialize = "server")]
    Server,

    /// HMI clients and engineering workstations.
    #[serde(rename = "Workstations (HMI/Eng)")]
    #[strum(serialize = "Workstations (HMI/Eng)", serialize = "workstation")]
    Workstation,

    /// PLCs, RTUs, IEDs — field controllers.
    #[serde(rename = "Controllers (PLC/RTU)")]
    #[strum(serialize = "Controllers (PLC/RTU)", serialize = "controller")]
    Controller,

    /// Industrial IoT gateways and sensors.
    #[serde(rename = "IIoT / Sensors")]
    #[strum(serialize = "IIoT / Sensors", serialize = "iot")]
    Iot,

    /// Firewalls, IDPS, and other security appliances.
    #[serde(rename = "Security Devices")]
    #[strum(serialize = "Security Devices", serialize = "security")]
    Security,
}

/// How a device category ships its logs to the SOC.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum LogSourceType {
    #[strum(serialize = "Syslog", serialize = "syslog")]
    Syslog,

    #[serde(rename = "WinEvent")]
    #[strum(serialize = "WinEvent", serialize = "winevent")]
    WinEvent,

    #[serde(rename = "NetFlow")]
    #[strum(serialize = "NetFlow", serialize = "netflow")]
    NetFlow,

    #[serde(rename = "Flat File")]
    #[strum(serialize = "Flat File", serialize = "flat-file")]
    FlatFile,

    #[serde(rename = "API/DB")]
    #[strum(serialize = "API/DB", serialize = "api")]
    Api,
}

/// One row of the asset inventory: a named group of same-type devices
/// sharing a log source and per-unit event rate.
///
/// Wire format matches the report API: camelCase keys, display strings for
/// the enumerations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCategory {
    /// Stable identifier, unique within the inventory.
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub log_source_type: LogSourceType,
    /// Number of physical/logical units in this category.
    pub count: u32,
    /// Average events-per-second contributed by one unit.
    pub base_eps_multiplier: f64,
    pub description: String,
}

impl DeviceCategory {
    /// EPS contributed by this category under the given global multiplier.
    pub fn eps(&self, multiplier: TrafficMultiplier) -> f64 {
        f64::from(self.count) * self.base_eps_multiplier * multiplier.value()
    }
}

/// Global traffic multiplier modelling overall network "noisiness".
///
/// Always within `[0.5, 2.0]` — construction and deserialization clamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct TrafficMultiplier(f64);

impl TrafficMultiplier {
    pub const MIN: f64 = 0.5;
    pub const MAX: f64 = 2.0;

    /// Build a multiplier, clamping out-of-range values into `[MIN, MAX]`.
    pub fn new(value: f64) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for TrafficMultiplier {
    fn default() -> Self {
        Self(1.0)
    }
}

impl From<f64> for TrafficMultiplier {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<TrafficMultiplier> for f64 {
    fn from(m: TrafficMultiplier) -> Self {
        m.0
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]

    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::{DeviceType, LogSourceType, TrafficMultiplier};

    #[test]
    fn device_type_enumeration_order_is_stable() {
        let order: Vec<DeviceType> = DeviceType::iter().collect();
        assert_eq!(
            order,
            vec![
                DeviceType::Network,
                DeviceType::Server,
                DeviceType::Workstation,
                DeviceType::Controller,
                DeviceType::Iot,
                DeviceType::Security,
            ]
        );
    }

    #[test]
    fn enums_serialize_as_display_strings() {
        assert_eq!(
            serde_json::to_value(DeviceType::Server).unwrap(),
            serde_json::json!("Servers & Historians")
        );
        assert_eq!(
            serde_json::to_value(LogSourceType::Api).unwrap(),
            serde_json::json!("API/DB")
        );
    }

    #[test]
    fn multiplier_clamps_to_range() {
        assert_eq!(TrafficMultiplier::new(0.1).value(), 0.5);
        assert_eq!(TrafficMultiplier::new(5.0).value(), 2.0);
        assert_eq!(TrafficMultiplier::new(1.3).value(), 1.3);
        assert_eq!(TrafficMultiplier::default().value(), 1.0);
    }

    #[test]
    fn multiplier_clamps_on_deserialize() {
        let m: TrafficMultiplier = serde_json::from_str("3.5").unwrap();
        assert_eq!(m.value(), 2.0);
    }
}
