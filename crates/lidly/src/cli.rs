//! Clap derive structures for the `lidly` CLI.
//!
//! Defines the command tree, global flags, and shared enums.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// lidly -- Lidl Plus coupon activation from the command line
#[derive(Debug, Parser)]
#[command(
    name = "lidly",
    version,
    about = "Activate Lidl Plus coupons from the command line",
    long_about = "Authenticates against the Lidl Plus loyalty backend, enumerates\n\
        available discount coupons across both API generations (v2 coupons\n\
        and legacy v1 promotions), and activates every offer whose validity\n\
        window covers the current time.",
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
    /// Account profile to use
    #[arg(long, short = 'p', env = "LIDLY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Country code (overrides profile)
    #[arg(long, env = "LIDLY_COUNTRY", global = true)]
    pub country: Option<String>,

    /// Accept-Language tag (overrides profile)
    #[arg(long, env = "LIDLY_LANGUAGE", global = true)]
    pub language: Option<String>,

    /// Refresh token (overrides profile and keyring)
    #[arg(long, env = "LIDLY_REFRESH_TOKEN", global = true, hide_env = true)]
    pub refresh_token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "LIDLY_OUTPUT",
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

    /// Request timeout in seconds
    #[arg(long, env = "LIDLY_TIMEOUT", default_value = "10", global = true)]
    pub timeout: u64,
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
    /// Run one activation pass (or a scheduled loop with --every)
    #[command(alias = "a")]
    Activate(ActivateArgs),

    /// List v2 coupons
    #[command(alias = "c")]
    Coupons(CouponsArgs),

    /// List legacy v1 promotions
    #[command(alias = "promos")]
    Promotions(PromotionsArgs),

    /// Manage configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Activate ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ActivateArgs {
    /// Keep running, repeating the pass every N seconds
    #[arg(long, value_name = "SECONDS")]
    pub every: Option<u64>,
}

// ── Coupons / Promotions ─────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CouponsArgs {
    #[command(subcommand)]
    pub command: CouponsCommand,
}

#[derive(Debug, Subcommand)]
pub enum CouponsCommand {
    /// List all v2 coupons in the current batch
    #[command(alias = "ls")]
    List {
        /// Show only offers currently eligible for activation
        #[arg(long)]
        eligible: bool,
    },
}

#[derive(Debug, Args)]
pub struct PromotionsArgs {
    #[command(subcommand)]
    pub command: PromotionsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PromotionsCommand {
    /// List all legacy v1 promotions in the current batch
    #[command(alias = "ls")]
    List {
        /// Show only offers currently eligible for activation
        #[arg(long)]
        eligible: bool,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive wizard to create a profile
    Init,

    /// Show the configuration with secrets redacted
    Show,

    /// Print the configuration file path
    Path,

    /// Store a refresh token in the system keyring
    SetToken {
        /// Profile to store the token for (default: active profile)
        profile: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
