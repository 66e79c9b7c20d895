//! Clap derive structures for the `unibridge` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use unibridge_api::PageRequest;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// unibridge -- query and operate a UniFi Network controller
#[derive(Debug, Parser)]
#[command(
    name = "unibridge",
    version,
    about = "Query and operate a UniFi Network controller",
    long_about = "Talks to the controller's Integration API (/integration/v1) and\n\
        Legacy API (/api/s/{site}) with a single API key.",
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
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "UNIBRIDGE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Network application URL, e.g. https://192.168.1.1/proxy/network
    #[arg(long, short = 'u', global = true)]
    pub base_url: Option<String>,

    /// Site ID (overrides the configured default site)
    #[arg(long, short = 's', global = true)]
    pub site: Option<String>,

    /// API key (prefer UNIFI_API_KEY or the keyring)
    #[arg(long, global = true, hide = true)]
    pub api_key: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
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

    /// Confirm destructive operations
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// One identifier per line
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Controller application info
    Info,

    /// List and look up sites
    Sites(SitesArgs),

    /// Adopted and pending devices
    #[command(alias = "dev")]
    Devices(DevicesArgs),

    /// Connected clients and station commands
    #[command(alias = "cl")]
    Clients(ClientsArgs),

    /// WiFi broadcasts (SSIDs)
    Wifi(ToggleArgs),

    /// Networks and VLANs
    #[command(alias = "net")]
    Networks(ToggleArgs),

    /// Firewall policies
    #[command(alias = "fw")]
    Firewall(ToggleArgs),

    /// ACL rules
    Acl(AclArgs),

    /// Hotspot vouchers
    Vouchers(VouchersArgs),

    /// Recent events
    Events(EventsArgs),

    /// Alarms
    Alarms(AlarmsArgs),

    /// Per-subsystem site health
    Health,

    /// Manage the configuration file and stored API key
    Config(ConfigArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

/// Pagination arguments for Integration list commands.
#[derive(Debug, Clone, Copy, Args)]
pub struct ListArgs {
    /// Max results (0 = controller default)
    #[arg(long, short = 'l', default_value = "0")]
    pub limit: i64,

    /// Pagination offset
    #[arg(long, default_value = "0")]
    pub offset: i64,
}

impl ListArgs {
    pub fn page(self) -> PageRequest {
        PageRequest::new(self.offset, self.limit)
    }
}

// ── Sites ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SitesArgs {
    #[command(subcommand)]
    pub command: SitesCommand,
}

#[derive(Debug, Subcommand)]
pub enum SitesCommand {
    /// List sites
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Follow pagination and list every site
        #[arg(long, short = 'a', conflicts_with_all = ["limit", "offset"])]
        all: bool,
    },
    /// Find a site by ID (defaults to the configured site)
    Get { id: Option<String> },
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List adopted devices
    List(ListArgs),
    /// Show one device
    Get { id: String },
    /// Latest statistics for a device
    Stats { id: String },
    /// Devices waiting for adoption (all sites)
    Pending(ListArgs),
    /// Restart a device
    Restart { id: String },
    /// Power-cycle a PoE port
    PowerCycle {
        id: String,
        /// Port index (1-based)
        #[arg(long)]
        port: u32,
    },
    /// Blink a device's locate LED (by MAC)
    Locate {
        mac: String,
        /// Turn the LED off instead
        #[arg(long)]
        off: bool,
    },
}

// ── Clients ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ClientsArgs {
    #[command(subcommand)]
    pub command: ClientsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ClientsCommand {
    /// List connected clients (Integration API)
    List(ListArgs),
    /// List connected stations with radio and traffic detail (Legacy API)
    Active,
    /// Block a client by MAC
    Block { mac: String },
    /// Unblock a client by MAC
    Unblock { mac: String },
    /// Disconnect a client by MAC
    Kick { mac: String },
    /// Remove a client's history (requires --yes)
    Forget { mac: String },
}

// ── Toggleable resources ─────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ToggleArgs {
    #[command(subcommand)]
    pub command: ToggleCommand,
}

#[derive(Debug, Subcommand)]
pub enum ToggleCommand {
    /// List resources
    List(ListArgs),
    /// Enable a resource by ID
    Enable { id: String },
    /// Disable a resource by ID
    Disable { id: String },
}

#[derive(Debug, Args)]
pub struct AclArgs {
    #[command(subcommand)]
    pub command: AclCommand,
}

#[derive(Debug, Subcommand)]
pub enum AclCommand {
    /// List ACL rules
    List(ListArgs),
    /// Enable a rule
    Enable { id: String },
    /// Disable a rule
    Disable { id: String },
    /// Show the evaluation order
    Order,
    /// Replace the evaluation order with the given rule IDs
    Reorder {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

// ── Vouchers ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct VouchersArgs {
    #[command(subcommand)]
    pub command: VouchersCommand,
}

#[derive(Debug, Subcommand)]
pub enum VouchersCommand {
    /// List vouchers
    List(ListArgs),
    /// Generate vouchers
    Create {
        /// Voucher name (shown in the portal)
        #[arg(long)]
        name: String,
        /// How many vouchers to create
        #[arg(long, default_value = "1")]
        count: u32,
        /// Access time per voucher, in minutes
        #[arg(long)]
        minutes: u64,
    },
    /// Revoke a voucher (requires --yes)
    Delete { id: String },
}

// ── Events / alarms ──────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EventsArgs {
    /// Max events (0 = controller default)
    #[arg(long, short = 'l', default_value = "50")]
    pub limit: u32,
}

#[derive(Debug, Args)]
pub struct AlarmsArgs {
    #[command(subcommand)]
    pub command: Option<AlarmsCommand>,

    /// List archived alarms instead of active ones
    #[arg(long)]
    pub archived: bool,
}

#[derive(Debug, Subcommand)]
pub enum AlarmsCommand {
    /// Archive (acknowledge) an alarm
    Archive { id: String },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,
    /// Show the effective settings (API key redacted)
    Show,
    /// Write a config file from --base-url, --site and --insecure
    Init {
        /// Name of an environment variable that holds the API key
        #[arg(long)]
        api_key_env: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Read an API key from stdin and store it in the OS keyring
    SetKey,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }
}
