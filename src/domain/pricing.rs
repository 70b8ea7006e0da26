use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};

use super::checkout::PaymentMethod;
use super::errors::DomainError;

/// Totals are kept in currency minor units (cents).
const CURRENCY_SCALE: i64 = 2;

const CREDIT_CARD_SURCHARGE: &str = "1.03";

/// Sum `prices` and apply the surcharge for `method`.
///
/// Credit card payments are multiplied by 1.03; every other method pays the
/// plain sum. The result is rounded half-even to two decimal places.
pub fn compute_total(
    prices: &[BigDecimal],
    method: PaymentMethod,
) -> Result<BigDecimal, DomainError> {
    let zero = BigDecimal::from(0);
    if let Some(negative) = prices.iter().find(|p| **p < zero) {
        return Err(DomainError::InvalidInput(format!(
            "price cannot be negative: {negative}"
        )));
    }

    let sum: BigDecimal = prices.iter().sum();
    let total = match method {
        PaymentMethod::CreditCard => sum * surcharge_factor()?,
        PaymentMethod::Pix | PaymentMethod::Boleto => sum,
    };

    Ok(total.with_scale_round(CURRENCY_SCALE, RoundingMode::HalfEven))
}

fn surcharge_factor() -> Result<BigDecimal, DomainError> {
    BigDecimal::from_str(CREDIT_CARD_SURCHARGE)
        .map_err(|e| DomainError::Internal(format!("bad surcharge constant: {e}")))
}
