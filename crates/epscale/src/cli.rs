//! Clap derive structures for the `epscale` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Only depends on clap + std so build.rs can include it for man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// epscale -- OT SOC log-ingestion sizing from the command line
#[derive(Debug, Parser)]
#[command(
    name = "epscale",
    version,
    about = "Size OT SOC log ingestion (EPS and storage) from the command line",
    long_about = "Estimate aggregate events-per-second and storage volume for an\n\
        Operational Technology SOC from a device-category inventory, request\n\
        AI-generated sizing reports, and review the admin usage log.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// API profile to use
    #[arg(long, short = 'p', env = "EPSCALE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Sizing API base URL (overrides profile)
    #[arg(long, short = 'e', env = "EPSCALE_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Id token for the sizing API
    #[arg(long, env = "EPSCALE_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Inventory file (defaults to the per-user config directory)
    #[arg(long, short = 'i', env = "EPSCALE_INVENTORY", global = true)]
    pub inventory: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "EPSCALE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "EPSCALE_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (default 30, profile can override)
    #[arg(long, env = "EPSCALE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Domain value enums ───────────────────────────────────────────────

/// Device class for a category.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DeviceClass {
    /// Network Infrastructure
    Network,
    /// Servers & Historians
    Server,
    /// Workstations (HMI/Eng)
    Workstation,
    /// Controllers (PLC/RTU)
    Controller,
    /// IIoT / Sensors
    Iot,
    /// Security Devices
    Security,
}

/// Log transport a category ships events over.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogSource {
    Syslog,
    Winevent,
    Netflow,
    FlatFile,
    Api,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute EPS and storage volume for the inventory
    #[command(alias = "est")]
    Estimate(EstimateArgs),

    /// Edit the device-category inventory
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Request an AI-generated sizing report
    Report(ReportArgs),

    /// View the admin usage log
    Usage(UsageArgs),

    /// Sign in, register, and manage tokens
    Auth(AuthArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ESTIMATE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EstimateArgs {
    /// Global traffic multiplier override (0.5 = quiet, 2.0 = noisy)
    #[arg(long, short = 'm', value_name = "FACTOR")]
    pub multiplier: Option<f64>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List inventory categories with their EPS contributions
    #[command(alias = "ls")]
    List,

    /// Show one category in detail
    Show {
        /// Category id (e.g. "fw", "plc")
        id: String,
    },

    /// Set the unit count of a category
    SetCount {
        /// Category id
        id: String,
        /// Number of units
        count: u32,
    },

    /// Set the per-unit EPS rate of a category
    SetRate {
        /// Category id
        id: String,
        /// Average events-per-second per unit (negative clamps to 0)
        rate: f64,
    },

    /// Change a category's log source (re-seeds the recommended rate)
    SetSource {
        /// Category id
        id: String,
        /// New log source
        source: LogSource,
    },

    /// Set the global traffic multiplier (0.5 - 2.0)
    SetMultiplier {
        /// Multiplier value
        value: f64,
    },

    /// Add a new category
    Add {
        /// Category id (generated when omitted)
        #[arg(long)]
        id: Option<String>,

        /// Display name
        #[arg(long)]
        name: String,

        /// Device class
        #[arg(long = "type", value_name = "TYPE")]
        class: DeviceClass,

        /// Log source
        #[arg(long)]
        source: LogSource,

        /// Number of units
        #[arg(long, default_value = "0")]
        count: u32,

        /// Per-unit EPS rate (defaults to the recommended value)
        #[arg(long)]
        rate: Option<f64>,

        /// Description
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Remove a category
    #[command(alias = "rm")]
    Remove {
        /// Category id
        id: String,
    },

    /// Restore the seed catalog and default multiplier
    Reset,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REPORT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Global traffic multiplier override for this report
    #[arg(long, short = 'm', value_name = "FACTOR")]
    pub multiplier: Option<f64>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  USAGE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct UsageArgs {
    /// Max records per page (1-200)
    #[arg(long, short = 'l', default_value = "50", value_parser = clap::value_parser!(u32).range(1..=200))]
    pub limit: u32,

    /// Continuation key from a previous page
    #[arg(long)]
    pub last_key: Option<String>,

    /// Fetch all pages automatically
    #[arg(long, short = 'a')]
    pub all: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AUTH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Sign in and store tokens in the system keyring
    Login {
        /// Account email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },

    /// Remove stored tokens for the active profile
    Logout,

    /// Show where the active credential comes from
    Status,

    /// Register a new account
    Register,

    /// Confirm a registration with the emailed verification code
    Confirm {
        /// Account email
        email: String,
        /// Verification code
        code: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Show the effective configuration (secrets redacted)
    Show,

    /// Print the config file path
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
