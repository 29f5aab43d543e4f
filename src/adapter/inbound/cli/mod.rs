//! CLI module graph.

pub mod check;
pub mod command;
pub mod output;
pub mod trade;

pub use command::{CheckCommand, Cli, Commands, TradeArgs};
