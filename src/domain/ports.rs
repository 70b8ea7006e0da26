use std::sync::Arc;

use super::errors::DomainError;
use super::product::{Product, ProductDraft};
use super::user::{NewUser, User};

pub trait ProductRepository: Send + Sync + 'static {
    fn create(&self, draft: ProductDraft) -> Result<i64, DomainError>;
    fn find_all(&self) -> Result<Vec<Product>, DomainError>;
    fn find_by_id(&self, id: i64) -> Result<Option<Product>, DomainError>;
    /// Fails with `NotFound` when no product has `product.id`.
    fn update(&self, product: Product) -> Result<(), DomainError>;
    /// Fails with `NotFound` when no product has `id`.
    fn delete(&self, id: i64) -> Result<(), DomainError>;
}

pub trait UserRepository: Send + Sync + 'static {
    /// Fails with `Conflict` when the email is already taken.
    fn create(&self, user: NewUser) -> Result<i64, DomainError>;
    fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;
    /// `email` must already be normalized.
    fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    fn list(&self) -> Result<Vec<User>, DomainError>;
    /// Overwrites name, email, hash and role of `user.id`. Fails with
    /// `NotFound` when no such user exists and `Conflict` when the email
    /// belongs to another user.
    fn update(&self, user: User) -> Result<(), DomainError>;
    fn delete(&self, id: i64) -> Result<(), DomainError>;
}

impl<T: ProductRepository + ?Sized> ProductRepository for Arc<T> {
    fn create(&self, draft: ProductDraft) -> Result<i64, DomainError> {
        (**self).create(draft)
    }

    fn find_all(&self) -> Result<Vec<Product>, DomainError> {
        (**self).find_all()
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Product>, DomainError> {
        (**self).find_by_id(id)
    }

    fn update(&self, product: Product) -> Result<(), DomainError> {
        (**self).update(product)
    }

    fn delete(&self, id: i64) -> Result<(), DomainError> {
        (**self).delete(id)
    }
}

impl<T: UserRepository + ?Sized> UserRepository for Arc<T> {
    fn create(&self, user: NewUser) -> Result<i64, DomainError> {
        (**self).create(user)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        (**self).find_by_id(id)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        (**self).find_by_email(email)
    }

    fn list(&self) -> Result<Vec<User>, DomainError> {
        (**self).list()
    }

    fn update(&self, user: User) -> Result<(), DomainError> {
        (**self).update(user)
    }

    fn delete(&self, id: i64) -> Result<(), DomainError> {
        (**self).delete(id)
    }
}
