use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Order must contain at least one product")]
    EmptyOrder,
    #[error("Product {0} not found")]
    ProductNotFound(i64),
    #[error("{0} not found")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Permission denied")]
    Forbidden,
    #[error("Token signing secret is not configured")]
    MisconfiguredSecret,
    #[error("Operation cancelled")]
    Cancelled,
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
