//! Order intent types.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ValidationError;

use super::id::TokenId;

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order.
    Buy,
    /// Sell order.
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

impl FromStr for Side {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            other => Err(ValidationError::InvalidSide {
                side: other.to_string(),
            }),
        }
    }
}

/// An intent to trade, before validation.
///
/// Immutable once constructed. Lifecycle: create, validate, consume by the
/// execution pipeline, discard.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    /// The token to trade.
    pub token_id: TokenId,
    /// Buy or Sell.
    pub side: Side,
    /// Limit price in USDC per token.
    pub price: Decimal,
    /// Number of tokens.
    pub size: Decimal,
    /// When true, the pipeline returns without invoking the submission
    /// capability.
    pub dry_run: bool,
}

impl OrderRequest {
    /// Total cost of the order in USDC.
    #[must_use]
    pub fn total_cost(&self) -> Decimal {
        self.price * self.size
    }
}

/// An order request that has passed safety validation.
///
/// Only constructible through [`validate`](super::validate::validate), so
/// the execution pipeline cannot accept an unvalidated request.
#[derive(Debug, Clone)]
pub struct ValidatedOrder {
    inner: OrderRequest,
}

impl ValidatedOrder {
    /// Tag a request as validated. Private to the domain module.
    pub(super) fn new(inner: OrderRequest) -> Self {
        Self { inner }
    }

    /// The token to trade.
    #[must_use]
    pub fn token_id(&self) -> &TokenId {
        &self.inner.token_id
    }

    /// Buy or Sell.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.inner.side
    }

    /// Limit price in USDC per token.
    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.inner.price
    }

    /// Number of tokens.
    #[must_use]
    pub const fn size(&self) -> Decimal {
        self.inner.size
    }

    /// Whether submission should be skipped.
    #[must_use]
    pub const fn dry_run(&self) -> bool {
        self.inner.dry_run
    }

    /// Total cost of the order in USDC.
    #[must_use]
    pub fn total_cost(&self) -> Decimal {
        self.inner.total_cost()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn side_parses_case_insensitively() {
        assert_eq!(Side::from_str("buy").unwrap(), Side::Buy);
        assert_eq!(Side::from_str("SELL").unwrap(), Side::Sell);
        assert_eq!(Side::from_str(" Buy ").unwrap(), Side::Buy);
    }

    #[test]
    fn unknown_side_is_rejected() {
        let err = Side::from_str("hold").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSide { side } if side == "hold"));
    }

    #[test]
    fn total_cost_is_price_times_size() {
        let request = OrderRequest {
            token_id: TokenId::new("12345"),
            side: Side::Buy,
            price: dec!(0.60),
            size: dec!(10.0),
            dry_run: false,
        };
        assert_eq!(request.total_cost(), dec!(6.0));
    }
}
