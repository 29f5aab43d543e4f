//! Command-line interface definitions.
//!
//! Defines the CLI structure for polyexec using `clap`. The CLI exposes
//! the `trade` command for placing limit orders and a `check` command
//! group for verifying environment configuration.

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

/// Polymarket CLOB order execution CLI
#[derive(Parser, Debug)]
#[command(name = "polyexec")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the polyexec CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Place a limit order on the CLOB
    Trade(TradeArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `polyexec check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the environment configuration.
    Config,
}

/// Arguments for the `trade` subcommand.
///
/// Specifies the order to place. Price and size are decimal strings;
/// the price must lie in the CLOB's 0.01..=1.00 band and the size is
/// bounded by the configured safety limits.
#[derive(Parser, Debug)]
pub struct TradeArgs {
    /// CLOB token ID identifying the outcome to trade.
    #[arg(long)]
    pub token_id: String,

    /// Limit price in USDC per token (0.01 to 1.00 inclusive).
    #[arg(long)]
    pub price: Decimal,

    /// Order size in tokens.
    #[arg(long)]
    pub size: Decimal,

    /// Order side ("buy" or "sell").
    #[arg(long, default_value = "buy")]
    pub side: String,

    /// Validate the order but skip submission.
    #[arg(long)]
    pub dry_run: bool,
}
