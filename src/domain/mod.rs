pub mod auth;
pub mod cancel;
pub mod checkout;
pub mod errors;
pub mod ports;
pub mod pricing;
pub mod product;
pub mod user;
