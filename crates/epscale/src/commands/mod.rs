//! Command handlers, one module per top-level subcommand.

pub mod auth;
pub mod config_cmd;
pub mod devices;
pub mod estimate;
pub mod report;
pub mod usage;

mod util;
