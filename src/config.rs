//! Environment-derived configuration.
//!
//! All settings come from `POLYMARKET_*` environment variables (a `.env`
//! file is honored via `dotenvy` in the binary entry point). The resulting
//! [`Settings`] value is built once at startup and never mutated.

use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::domain::SafetyLimits;
use crate::error::ConfigError;

/// Polygon mainnet chain ID.
pub const POLYGON_MAINNET: u64 = 137;
/// Polygon Amoy testnet chain ID.
pub const POLYGON_AMOY: u64 = 80002;

const DEFAULT_HOST: &str = "https://clob.polymarket.com";

/// Immutable process-wide settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// CLOB REST API base URL.
    pub host: String,
    /// Chain ID for signature domain separation.
    pub chain_id: u64,
    /// Wallet private key (hex, optional 0x prefix).
    pub private_key: String,
    /// Polymarket proxy (funder) address.
    pub proxy_address: String,
    /// Signature scheme selector (1 or 2).
    pub signature_type: u8,
    /// Trading safety limits.
    pub limits: SafetyLimits,
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a required variable is missing or a
    /// value fails to parse or validate.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an injected variable lookup.
    ///
    /// Tests use this with a map instead of mutating the process
    /// environment.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let host = lookup("POLYMARKET_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        Url::parse(&host).map_err(|e| ConfigError::InvalidValue {
            field: "POLYMARKET_HOST",
            reason: e.to_string(),
        })?;

        let chain_id = parse_or("POLYMARKET_CHAIN_ID", &lookup, POLYGON_MAINNET)?;
        if chain_id != POLYGON_MAINNET && chain_id != POLYGON_AMOY {
            warn!(chain_id, "unusual chain id");
        }

        let private_key = require("POLYMARKET_PRIVATE_KEY", &lookup)?;
        if !is_hex_of_len(&private_key, 64) {
            return Err(ConfigError::InvalidValue {
                field: "POLYMARKET_PRIVATE_KEY",
                reason: "expected 64 hex characters (optional 0x prefix)".to_string(),
            });
        }

        let proxy_address = require("POLYMARKET_PROXY_ADDRESS", &lookup)?;
        if !is_hex_of_len(&proxy_address, 40) {
            return Err(ConfigError::InvalidValue {
                field: "POLYMARKET_PROXY_ADDRESS",
                reason: "expected 40 hex characters (optional 0x prefix)".to_string(),
            });
        }

        let signature_type = match lookup("POLYMARKET_SIGNATURE_TYPE") {
            None => 1,
            Some(raw) => match raw.trim().parse::<u8>() {
                Ok(t @ (1 | 2)) => t,
                _ => {
                    warn!(value = %raw, "invalid signature type, using default 1");
                    1
                }
            },
        };

        let max_order_size: Decimal =
            parse_or("POLYMARKET_MAX_ORDER_SIZE", &lookup, dec!(1000.0))?;
        if max_order_size <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "POLYMARKET_MAX_ORDER_SIZE",
                reason: "must be positive".to_string(),
            });
        }

        let max_total_cost = match lookup("POLYMARKET_MAX_TOTAL_COST") {
            None => None,
            Some(raw) => {
                let cost: Decimal = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    field: "POLYMARKET_MAX_TOTAL_COST",
                    reason: format!("'{raw}' is not a decimal"),
                })?;
                Some(cost)
            }
        };

        let limits = SafetyLimits {
            max_order_size,
            max_total_cost,
            max_retries: parse_or("POLYMARKET_MAX_RETRIES", &lookup, 3)?,
            connection_timeout: Duration::from_secs(parse_or(
                "POLYMARKET_CONNECTION_TIMEOUT",
                &lookup,
                30,
            )?),
            request_timeout: Duration::from_secs(parse_or(
                "POLYMARKET_REQUEST_TIMEOUT",
                &lookup,
                10,
            )?),
        };

        Ok(Self {
            host,
            chain_id,
            private_key,
            proxy_address,
            signature_type,
            limits,
        })
    }

    /// Private key with all but the first four and last four characters
    /// masked, for display.
    #[must_use]
    pub fn masked_private_key(&self) -> String {
        let key = self.private_key.trim_start_matches("0x");
        if key.len() < 8 {
            return "****".to_string();
        }
        format!("{}…{}", &key[..4], &key[key.len() - 4..])
    }
}

fn require(
    field: &'static str,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    match lookup(field) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::MissingField { field }),
    }
}

fn parse_or<T: std::str::FromStr>(
    field: &'static str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(field) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            field,
            reason: format!("could not parse '{raw}'"),
        }),
    }
}

fn is_hex_of_len(value: &str, len: usize) -> bool {
    let cleaned = value.trim_start_matches("0x");
    cleaned.len() == len && cleaned.chars().all(|c| c.is_ascii_hexdigit())
}

/// Initialize global tracing output.
///
/// `RUST_LOG` takes precedence; otherwise verbosity maps `-v` counts to
/// level filters. JSON log format follows the CLI's `--json` flag so
/// scripted output stays machine-readable.
pub fn init_logging(verbosity: u8, json: bool) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("polyexec={default_level}")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // Ignore the error if a subscriber is already set (tests).
    if json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}
