//! Handler for the `check config` command.

use crate::adapter::inbound::cli::output;
use crate::config::Settings;

/// Validate environment configuration without placing an order.
/// Returns the process exit code.
pub fn execute_config() -> u8 {
    output::header(env!("CARGO_PKG_VERSION"));

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            output::error(&e.to_string());
            output::hint("set POLYMARKET_PRIVATE_KEY to the wallet private key (64 hex chars)");
            output::hint("set POLYMARKET_PROXY_ADDRESS to the Polymarket proxy wallet address");
            output::hint("optional: POLYMARKET_SIGNATURE_TYPE, POLYMARKET_MAX_ORDER_SIZE, POLYMARKET_MAX_TOTAL_COST, POLYMARKET_MAX_RETRIES");
            output::hint("variables may also be placed in a .env file");
            return 1;
        }
    };

    output::field("Host", &settings.host);
    output::field("Chain ID", settings.chain_id);
    output::field("Funder", &settings.proxy_address);
    output::field("Signature type", settings.signature_type);
    output::field("Private key", settings.masked_private_key());
    output::field("Max order size", settings.limits.max_order_size);
    match settings.limits.max_total_cost {
        Some(cost) => output::field("Max total cost", cost),
        None => output::field("Max total cost", "unlimited"),
    }
    output::field("Max retries", settings.limits.max_retries);
    output::field(
        "Conn timeout",
        format!("{}s", settings.limits.connection_timeout.as_secs()),
    );
    output::field(
        "Req timeout",
        format!("{}s", settings.limits.request_timeout.as_secs()),
    );

    output::success("configuration is valid");
    0
}
