//! Order submission for the Polymarket CLOB.
//!
//! Implements the [`OrderSubmitter`] port on top of the Polymarket SDK:
//! authentication, order building, signing, and posting. Failures are
//! classified here into transient (network class) and permanent
//! (rejection class) so the execution pipeline can decide whether to
//! retry without inspecting exchange details.

use std::str::FromStr;
use std::sync::Arc;

use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use polymarket_client_sdk::auth::state::Authenticated;
use polymarket_client_sdk::auth::{Normal, Signer};
use polymarket_client_sdk::clob::types::{SignatureType, Side as ClobSide};
use polymarket_client_sdk::clob::{Client, Config as ClobConfig};
use polymarket_client_sdk::types::{Address, U256};
use tokio::time::{sleep, timeout};
use tracing::{info, warn};

use crate::config::Settings;
use crate::domain::{OrderId, Side, ValidatedOrder};
use crate::error::{ConfigError, Error, Result, SubmissionError};
use crate::pipeline::BackoffPolicy;
use crate::port::outbound::exchange::{OrderSubmitter, SubmissionReceipt};

/// Type alias for the authenticated CLOB client.
type AuthenticatedClient = Client<Authenticated<Normal>>;

/// Message fragments indicating a network-class failure worth retrying.
const TRANSIENT_MARKERS: &[&str] = &[
    "timeout",
    "timed out",
    "connection",
    "connect",
    "network",
    "temporarily",
    "429",
    "502",
    "503",
    "504",
];

/// Submitter for the Polymarket CLOB.
///
/// Owns the authenticated client and the local signing key. Thread-safe
/// and callable repeatedly, as the pipeline requires.
pub struct PolymarketSubmitter {
    client: Arc<AuthenticatedClient>,
    signer: Arc<PrivateKeySigner>,
}

impl PolymarketSubmitter {
    /// Authenticate with the CLOB and build a submitter.
    ///
    /// Authentication is retried with the same backoff schedule as
    /// submissions, bounded by the configured attempt budget, with each
    /// attempt capped by the connection timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the private key is invalid or authentication
    /// keeps failing after the retry budget is spent.
    pub async fn connect(settings: &Settings) -> Result<Self> {
        let signer = PrivateKeySigner::from_str(&settings.private_key)
            .map_err(|e| ConfigError::InvalidValue {
                field: "POLYMARKET_PRIVATE_KEY",
                reason: e.to_string(),
            })?
            .with_chain_id(Some(settings.chain_id));

        // Orders are funded by the Polymarket proxy wallet, not the signer.
        let funder =
            Address::from_str(&settings.proxy_address).map_err(|e| ConfigError::InvalidValue {
                field: "POLYMARKET_PROXY_ADDRESS",
                reason: e.to_string(),
            })?;

        info!(
            chain_id = settings.chain_id,
            host = %settings.host,
            funder = %settings.proxy_address,
            signature_type = settings.signature_type,
            "creating CLOB client"
        );

        let backoff = BackoffPolicy::default();
        let budget = settings.limits.attempt_budget();
        let mut attempt = 0u32;

        let client = loop {
            attempt += 1;
            let error = match timeout(
                settings.limits.connection_timeout,
                Self::authenticate(settings, &signer, funder),
            )
            .await
            {
                Ok(Ok(client)) => break client,
                Ok(Err(error)) => error,
                Err(_) => SubmissionError::Timeout(format!(
                    "authentication exceeded connection timeout of {:?}",
                    settings.limits.connection_timeout
                )),
            };

            warn!(attempt, error = %error, "CLOB authentication failed");
            if !error.is_retryable() || attempt >= budget {
                return Err(Error::Submission(error));
            }
            sleep(backoff.delay_for(attempt)).await;
        };

        info!("CLOB client authenticated");

        Ok(Self {
            client: Arc::new(client),
            signer: Arc::new(signer),
        })
    }

    async fn authenticate(
        settings: &Settings,
        signer: &PrivateKeySigner,
        funder: Address,
    ) -> std::result::Result<AuthenticatedClient, SubmissionError> {
        Client::new(&settings.host, ClobConfig::default())
            .map_err(|e| SubmissionError::Permanent(format!("failed to create CLOB client: {e}")))?
            .authentication_builder(signer)
            .funder(funder)
            .signature_type(clob_signature_type(settings.signature_type))
            .authenticate()
            .await
            .map_err(|e| classify(e.to_string()))
    }
}

/// Map the configured signature scheme selector to the SDK's enum.
/// 1 is the email/Magic proxy wallet, 2 the browser Gnosis Safe wallet.
fn clob_signature_type(signature_type: u8) -> SignatureType {
    if signature_type == 2 {
        SignatureType::GnosisSafe
    } else {
        SignatureType::Proxy
    }
}

/// Classify an SDK failure message into transient or permanent.
fn classify(message: String) -> SubmissionError {
    let lowered = message.to_ascii_lowercase();
    if TRANSIENT_MARKERS.iter().any(|m| lowered.contains(m)) {
        SubmissionError::Transient(message)
    } else {
        SubmissionError::Permanent(message)
    }
}

#[async_trait]
impl OrderSubmitter for PolymarketSubmitter {
    async fn submit(
        &self,
        order: &ValidatedOrder,
    ) -> std::result::Result<SubmissionReceipt, SubmissionError> {
        // Validation guarantees a plausible token id; a parse failure here
        // means the id is not a CLOB token number, which no retry fixes.
        let token_id = U256::from_str(order.token_id().as_str()).map_err(|e| {
            SubmissionError::Permanent(format!(
                "token id '{}' is not a valid CLOB token: {e}",
                order.token_id()
            ))
        })?;

        let side = match order.side() {
            Side::Buy => ClobSide::Buy,
            Side::Sell => ClobSide::Sell,
        };

        let unsigned = self
            .client
            .limit_order()
            .token_id(token_id)
            .side(side)
            .price(order.price())
            .size(order.size())
            .build()
            .await
            .map_err(|e| SubmissionError::Permanent(format!("failed to build order: {e}")))?;

        let signed = self
            .client
            .sign(self.signer.as_ref(), unsigned)
            .await
            .map_err(|e| SubmissionError::Permanent(format!("failed to sign order: {e}")))?;

        let response = self
            .client
            .post_order(signed)
            .await
            .map_err(|e| classify(e.to_string()))?;

        info!(
            order_id = %response.order_id,
            token_id = %order.token_id(),
            side = %order.side(),
            price = %order.price(),
            size = %order.size(),
            "order submitted"
        );

        Ok(SubmissionReceipt {
            order_id: OrderId::new(response.order_id),
        })
    }

    fn exchange_name(&self) -> &'static str {
        "Polymarket"
    }
}
