use bigdecimal::{BigDecimal, RoundingMode};

use super::errors::DomainError;

/// Column limits of `products.name` (VARCHAR(255)) and `products.price`
/// (NUMERIC(12, 2)).
const MAX_NAME_CHARS: usize = 255;
const PRICE_SCALE: i64 = 2;
const PRICE_CEILING: i64 = 10_000_000_000;

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
}

/// Fields a caller supplies when creating or replacing a product.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
}

impl ProductDraft {
    /// Trims the name and checks it and the price against what every store
    /// can hold exactly: a name of 1 to 255 characters and a non-negative
    /// price below 10^10 with at most two decimal places.
    pub fn validate(mut self) -> Result<Self, DomainError> {
        self.name = self.name.trim().to_string();
        if self.name.is_empty() {
            return Err(DomainError::InvalidInput(
                "product name cannot be empty".to_string(),
            ));
        }
        if self.name.chars().count() > MAX_NAME_CHARS {
            return Err(DomainError::InvalidInput(format!(
                "product name cannot exceed {MAX_NAME_CHARS} characters"
            )));
        }
        if self.price < BigDecimal::from(0) {
            return Err(DomainError::InvalidInput(
                "product price cannot be negative".to_string(),
            ));
        }
        if self.price >= BigDecimal::from(PRICE_CEILING) {
            return Err(DomainError::InvalidInput(
                "product price is too large".to_string(),
            ));
        }
        let cents = self.price.with_scale_round(PRICE_SCALE, RoundingMode::HalfEven);
        if cents != self.price {
            return Err(DomainError::InvalidInput(
                "product price cannot have more than two decimal places".to_string(),
            ));
        }
        self.price = cents;
        Ok(self)
    }

    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
        }
    }
}
