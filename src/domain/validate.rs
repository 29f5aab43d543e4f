//! Order request validation against safety limits.
//!
//! Rejects malformed or unsafe order requests before any network
//! interaction. Pure and deterministic: no side effects, no I/O.

use crate::error::ValidationError;

use super::limits::{SafetyLimits, MAX_PRICE, MIN_PRICE};
use super::order::{OrderRequest, ValidatedOrder};

/// Validate an order request against the configured safety limits.
///
/// On success the request is consumed and returned as a [`ValidatedOrder`],
/// the only type the execution pipeline accepts.
///
/// # Errors
///
/// Returns the first failing check: price range, size positivity, maximum
/// order size, total cost (skipped when no limit is configured), then
/// token-id plausibility.
pub fn validate(
    request: OrderRequest,
    limits: &SafetyLimits,
) -> Result<ValidatedOrder, ValidationError> {
    if request.price < MIN_PRICE || request.price > MAX_PRICE {
        return Err(ValidationError::InvalidPrice {
            price: request.price,
        });
    }

    if request.size.is_sign_negative() || request.size.is_zero() {
        return Err(ValidationError::InvalidSize { size: request.size });
    }

    if request.size > limits.max_order_size {
        return Err(ValidationError::OrderTooLarge {
            size: request.size,
            max: limits.max_order_size,
        });
    }

    if let Some(limit) = limits.max_total_cost {
        let cost = request.total_cost();
        if cost > limit {
            return Err(ValidationError::CostExceedsLimit { cost, limit });
        }
    }

    check_token_id(request.token_id.as_str())?;

    Ok(ValidatedOrder::new(request))
}

/// Token IDs must be non-empty and alphanumeric (underscore and hyphen
/// allowed), matching the exchange's identifier format.
fn check_token_id(token_id: &str) -> Result<(), ValidationError> {
    let trimmed = token_id.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidTokenId {
            reason: "token id is empty".to_string(),
        });
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ValidationError::InvalidTokenId {
            reason: format!("token id '{trimmed}' contains invalid characters"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::TokenId;
    use crate::domain::order::Side;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn request(price: Decimal, size: Decimal) -> OrderRequest {
        OrderRequest {
            token_id: TokenId::new("12345"),
            side: Side::Buy,
            price,
            size,
            dry_run: false,
        }
    }

    fn limits() -> SafetyLimits {
        SafetyLimits {
            max_order_size: dec!(1000.0),
            ..SafetyLimits::default()
        }
    }

    #[test]
    fn accepts_prices_at_both_boundaries() {
        assert!(validate(request(dec!(0.01), dec!(10)), &limits()).is_ok());
        assert!(validate(request(dec!(1.0), dec!(10)), &limits()).is_ok());
    }

    #[test]
    fn rejects_price_below_minimum() {
        let err = validate(request(dec!(0.009), dec!(10)), &limits()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPrice { .. }));
    }

    #[test]
    fn rejects_price_above_maximum() {
        let err = validate(request(dec!(1.5), dec!(5.0)), &limits()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPrice { .. }));
    }

    #[test]
    fn rejects_zero_and_negative_size() {
        for size in [dec!(0), dec!(-1)] {
            let err = validate(request(dec!(0.5), size), &limits()).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidSize { .. }));
        }
    }

    #[test]
    fn rejects_size_above_maximum() {
        let err = validate(request(dec!(0.5), dec!(1000.1)), &limits()).unwrap_err();
        assert!(matches!(err, ValidationError::OrderTooLarge { .. }));
    }

    #[test]
    fn accepts_size_at_maximum() {
        assert!(validate(request(dec!(0.5), dec!(1000)), &limits()).is_ok());
    }

    #[test]
    fn total_cost_check_skipped_without_limit() {
        let limits = SafetyLimits {
            max_total_cost: None,
            ..limits()
        };
        assert!(validate(request(dec!(1.0), dec!(1000)), &limits).is_ok());
    }

    #[test]
    fn rejects_cost_above_configured_limit() {
        let limits = SafetyLimits {
            max_total_cost: Some(dec!(100)),
            ..limits()
        };
        let err = validate(request(dec!(0.5), dec!(500)), &limits).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::CostExceedsLimit { cost, limit }
                if cost == dec!(250) && limit == dec!(100)
        ));
    }

    #[test]
    fn rejects_empty_token_id() {
        let mut req = request(dec!(0.5), dec!(10));
        req.token_id = TokenId::new("   ");
        let err = validate(req, &limits()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTokenId { .. }));
    }

    #[test]
    fn rejects_token_id_with_invalid_characters() {
        let mut req = request(dec!(0.5), dec!(10));
        req.token_id = TokenId::new("12.34");
        let err = validate(req, &limits()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTokenId { .. }));
    }

    #[test]
    fn validation_is_deterministic() {
        let limits = limits();
        let first = validate(request(dec!(1.5), dec!(5.0)), &limits).unwrap_err();
        let second = validate(request(dec!(1.5), dec!(5.0)), &limits).unwrap_err();
        assert_eq!(first, second);
    }
}
