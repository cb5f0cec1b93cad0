//! Clap derive structures for the `parkly` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// parkly -- book and manage parking spots from the command line
#[derive(Debug, Parser)]
#[command(
    name = "parkly",
    version,
    about = "Book and manage parking spots from the command line",
    long_about = "A client for the parkly parking reservation service.\n\n\
        Users browse lots, book and release spots and review their history.\n\
        Admins manage lots and look at occupancy and registered users.",
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
    /// Backend profile to use
    #[arg(long, short = 'p', env = "PARKLY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL, without /api (overrides profile)
    #[arg(long, short = 's', env = "PARKLY_SERVER", global = true)]
    pub server: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PARKLY_OUTPUT",
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
    #[arg(long, short = 'k', env = "PARKLY_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long, env = "PARKLY_TIMEOUT", global = true)]
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

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show who the current session belongs to
    #[command(alias = "whoami")]
    Me,

    /// Log in and keep the session for later commands
    Login(LoginArgs),

    /// End the session
    Logout,

    /// Create a user account
    Register(RegisterArgs),

    /// Browse and manage parking lots
    #[command(alias = "lot", alias = "l")]
    Lots(LotsArgs),

    /// Book a spot in a lot
    Book {
        /// Lot ID
        lot_id: String,
    },

    /// Release a reservation
    Release {
        /// Reservation ID
        reservation_id: String,
    },

    /// Show your reservation history
    #[command(alias = "hist")]
    History(HistoryArgs),

    /// Start an export of your history
    Export,

    /// List registered users (admin)
    Users,

    /// Show occupancy (admin) or your spending summary (user)
    Summary,

    /// List the pages `open` understands
    Routes,

    /// Render a page by path or name, e.g. `parkly open /dashboard`
    Open {
        /// Page path (`/lots`) or name (`lots`)
        path: String,

        /// Lot to show on /spots (defaults to the first lot)
        #[arg(long)]
        lot: Option<String>,

        /// Query for /search
        #[arg(long)]
        query: Option<String>,
    },

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AUTH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email (defaults to the profile's email)
    #[arg(long, short = 'e', env = "PARKLY_EMAIL")]
    pub email: Option<String>,

    /// Password (prompted when neither this nor a stored one is available)
    #[arg(long, env = "PARKLY_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Full name
    #[arg(long, required = true)]
    pub name: String,

    /// Account email
    #[arg(long, short = 'e', required = true)]
    pub email: String,

    /// Password (prompted when omitted)
    #[arg(long, env = "PARKLY_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LOTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LotsArgs {
    #[command(subcommand)]
    pub command: LotsCommand,
}

#[derive(Debug, Subcommand)]
pub enum LotsCommand {
    /// List lots visible to the current session
    #[command(alias = "ls")]
    List {
        /// Only lots with free spots
        #[arg(long)]
        available: bool,
    },

    /// Search lots by name, address or pin code
    Search {
        /// Search text
        query: String,
    },

    /// Create a lot (admin)
    Create {
        /// Display name
        #[arg(long, required = true)]
        name: String,

        /// Street address
        #[arg(long, required = true)]
        address: String,

        /// Pin code
        #[arg(long, required = true)]
        pin_code: String,

        /// Price per hour
        #[arg(long, required = true)]
        price: f64,

        /// Number of spots
        #[arg(long, required = true)]
        spots: u32,
    },

    /// Update a lot (admin)
    Update {
        /// Lot ID
        id: String,

        /// New display name
        #[arg(long)]
        name: Option<String>,

        /// New street address
        #[arg(long)]
        address: Option<String>,

        /// New pin code
        #[arg(long)]
        pin_code: Option<String>,

        /// New price per hour
        #[arg(long)]
        price: Option<f64>,

        /// New number of spots
        #[arg(long)]
        spots: Option<u32>,
    },

    /// Delete a lot (admin)
    #[command(alias = "rm")]
    Delete {
        /// Lot ID
        id: String,
    },

    /// Show the spots of a lot (admin)
    Spots {
        /// Lot ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  HISTORY
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Only reservations that are still open
    #[arg(long, conflicts_with = "completed")]
    pub active: bool,

    /// Only released reservations
    #[arg(long)]
    pub completed: bool,
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
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Key: server, email, password_env, ca_cert, insecure, timeout
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
