use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::errors::DomainError;
use super::user::validate_email;

/// Payment channel chosen at checkout. Only `credit_card` carries a surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Pix,
    Boleto,
    CreditCard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
}

impl CustomerInfo {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "customer name cannot be empty".to_string(),
            ));
        }
        validate_email(self.email.trim())
    }
}

#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub product_ids: Vec<i64>,
    pub payment_method: PaymentMethod,
    pub customer: CustomerInfo,
}

/// Result of a checkout. `id` stays `None` because orders are not persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Option<i64>,
    pub total: BigDecimal,
    pub payment_method: PaymentMethod,
    pub customer: CustomerInfo,
}
