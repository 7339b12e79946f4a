//! Seed catalog and the static per-unit EPS recommendation table.
//!
//! Rates are estimates for typical OT environments. Firewalls are chatty,
//! PLCs are usually quiet unless DPI is enabled.

use crate::model::{DeviceCategory, DeviceType, LogSourceType};

/// Recommended per-unit EPS for a `(device type, log source)` pair.
///
/// Used to pre-fill a category's rate when its log source changes. Total
/// over both enumerations — every pair resolves to a value.
pub fn recommended_eps(device_type: DeviceType, source: LogSourceType) -> f64 {
    match source {
        // Very high volume per source, regardless of what emits it
        LogSourceType::NetFlow => 200.0,
        LogSourceType::WinEvent => match device_type {
            DeviceType::Server => 15.0,
            DeviceType::Workstation => 3.0,
            _ => 5.0,
        },
        LogSourceType::Syslog => match device_type {
            DeviceType::Security => 50.0,
            DeviceType::Network => 2.0,
            DeviceType::Controller => 0.5,
            _ => 1.0,
        },
        LogSourceType::Api => 5.0,
        LogSourceType::FlatFile => 2.0,
    }
}

fn category(
    id: &str,
    name: &str,
    device_type: DeviceType,
    log_source_type: LogSourceType,
    count: u32,
    base_eps_multiplier: f64,
    description: &str,
) -> DeviceCategory {
    DeviceCategory {
        id: id.to_owned(),
        name: name.to_owned(),
        device_type,
        log_source_type,
        count,
        base_eps_multiplier,
        description: description.to_owned(),
    }
}

/// The default device catalog an inventory is seeded from.
pub fn default_catalog() -> Vec<DeviceCategory> {
    vec![
        category(
            "fw",
            "Firewalls / IDPS",
            DeviceType::Security,
            LogSourceType::Syslog,
            2,
            50.0,
            "OT/IT Boundary & Zone Firewalls",
        ),
        category(
            "switch",
            "Managed Switches",
            DeviceType::Network,
            LogSourceType::Syslog,
            10,
            2.0,
            "Core and Access Switches",
        ),
        category(
            "historian",
            "Historian Servers",
            DeviceType::Server,
            LogSourceType::WinEvent,
            1,
            15.0,
            "Process Data Historians",
        ),
        category(
            "opc",
            "OPC Servers",
            DeviceType::Server,
            LogSourceType::Api,
            1,
            10.0,
            "Connectivity Servers",
        ),
        category(
            "hmi",
            "HMI Clients",
            DeviceType::Workstation,
            LogSourceType::WinEvent,
            5,
            3.0,
            "Operator Stations",
        ),
        category(
            "eng",
            "Eng. Workstations",
            DeviceType::Workstation,
            LogSourceType::WinEvent,
            2,
            5.0,
            "Maintenance Laptops/Stations",
        ),
        category(
            "plc",
            "PLCs / RTUs",
            DeviceType::Controller,
            LogSourceType::Syslog,
            20,
            0.5,
            "Programmable Logic Controllers",
        ),
        category(
            "ied",
            "IEDs / Relays",
            DeviceType::Controller,
            LogSourceType::Syslog,
            0,
            0.2,
            "Intelligent Electronic Devices",
        ),
    ]
}
