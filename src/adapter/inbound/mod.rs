//! Inbound adapters: entry points driving the application core.

pub mod cli;
