pub mod checkout_service;
pub mod credential_service;
pub mod product_service;
pub mod user_service;
