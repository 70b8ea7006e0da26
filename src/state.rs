use std::sync::Arc;

use crate::application::checkout_service::CheckoutService;
use crate::application::credential_service::{CredentialService, TokenSettings};
use crate::application::product_service::ProductService;
use crate::application::user_service::UserService;
use crate::db::DbPool;
use crate::domain::ports::{ProductRepository, UserRepository};
use crate::infrastructure::memory::{InMemoryProductRepository, InMemoryUserRepository};
use crate::infrastructure::product_repo::DieselProductRepository;
use crate::infrastructure::user_repo::DieselUserRepository;

pub type SharedProducts = Arc<dyn ProductRepository>;
pub type SharedUsers = Arc<dyn UserRepository>;

/// Services shared by every worker, wired once at startup.
pub struct AppState {
    pub products: ProductService<SharedProducts>,
    pub checkout: CheckoutService<SharedProducts>,
    pub users: UserService<SharedUsers>,
    pub credentials: CredentialService<SharedUsers>,
}

impl AppState {
    pub fn new(products: SharedProducts, users: SharedUsers, tokens: TokenSettings) -> Self {
        Self {
            products: ProductService::new(products.clone()),
            checkout: CheckoutService::new(products),
            users: UserService::new(users.clone()),
            credentials: CredentialService::new(users, tokens),
        }
    }

    pub fn with_postgres(pool: DbPool, tokens: TokenSettings) -> Self {
        Self::new(
            Arc::new(DieselProductRepository::new(pool.clone())),
            Arc::new(DieselUserRepository::new(pool)),
            tokens,
        )
    }

    pub fn in_memory(tokens: TokenSettings) -> Self {
        Self::new(
            Arc::new(InMemoryProductRepository::default()),
            Arc::new(InMemoryUserRepository::default()),
            tokens,
        )
    }
}
