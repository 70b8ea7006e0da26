//! Process-local stores, used when no database is wanted (tests, demos).

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use crate::domain::errors::DomainError;
use crate::domain::ports::{ProductRepository, UserRepository};
use crate::domain::product::{Product, ProductDraft};
use crate::domain::user::{NewUser, User};

struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.insert(id, build(id));
        id
    }
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, DomainError> {
    lock.read()
        .map_err(|_| DomainError::StoreUnavailable("in-memory store lock poisoned".to_string()))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, DomainError> {
    lock.write()
        .map_err(|_| DomainError::StoreUnavailable("in-memory store lock poisoned".to_string()))
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    table: RwLock<Table<Product>>,
}

impl ProductRepository for InMemoryProductRepository {
    fn create(&self, draft: ProductDraft) -> Result<i64, DomainError> {
        Ok(write(&self.table)?.insert_with(|id| draft.into_product(id)))
    }

    fn find_all(&self) -> Result<Vec<Product>, DomainError> {
        Ok(read(&self.table)?.rows.values().cloned().collect())
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Product>, DomainError> {
        Ok(read(&self.table)?.rows.get(&id).cloned())
    }

    fn update(&self, product: Product) -> Result<(), DomainError> {
        let mut table = write(&self.table)?;
        match table.rows.get_mut(&product.id) {
            Some(existing) => {
                *existing = product;
                Ok(())
            }
            None => Err(DomainError::NotFound(format!("Product {}", product.id))),
        }
    }

    fn delete(&self, id: i64) -> Result<(), DomainError> {
        write(&self.table)?
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound(format!("Product {id}")))
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    table: RwLock<Table<User>>,
}

impl UserRepository for InMemoryUserRepository {
    fn create(&self, user: NewUser) -> Result<i64, DomainError> {
        let mut table = write(&self.table)?;
        if table.rows.values().any(|u| u.email == user.email) {
            return Err(DomainError::Conflict("email already in use".to_string()));
        }
        Ok(table.insert_with(|id| User {
            id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        }))
    }

    fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        Ok(read(&self.table)?.rows.get(&id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(read(&self.table)?
            .rows
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    fn list(&self) -> Result<Vec<User>, DomainError> {
        Ok(read(&self.table)?.rows.values().cloned().collect())
    }

    fn update(&self, user: User) -> Result<(), DomainError> {
        let mut table = write(&self.table)?;
        if table
            .rows
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(DomainError::Conflict("email already in use".to_string()));
        }
        match table.rows.get_mut(&user.id) {
            Some(existing) => {
                existing.name = user.name;
                existing.email = user.email;
                existing.password_hash = user.password_hash;
                existing.role = user.role;
                Ok(())
            }
            None => Err(DomainError::NotFound(format!("User {}", user.id))),
        }
    }

    fn delete(&self, id: i64) -> Result<(), DomainError> {
        write(&self.table)?
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound(format!("User {id}")))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::*;
    use crate::domain::user::Role;

    #[test]
    fn product_ids_are_sequential() {
        let repo = InMemoryProductRepository::default();
        let draft = ProductDraft {
            name: "Mug".to_string(),
            description: String::new(),
            price: BigDecimal::from_str("3.00").unwrap(),
        };
        assert_eq!(repo.create(draft.clone()).unwrap(), 1);
        assert_eq!(repo.create(draft).unwrap(), 2);
        assert_eq!(repo.find_all().unwrap().len(), 2);
    }

    #[test]
    fn duplicate_user_email_conflicts() {
        let repo = InMemoryUserRepository::default();
        let user = NewUser {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password_hash: "x".to_string(),
            role: Role::Customer,
        };
        repo.create(user.clone()).unwrap();
        assert!(matches!(repo.create(user), Err(DomainError::Conflict(_))));
    }

    #[test]
    fn user_update_keeps_created_at_and_checks_existence() {
        let repo = InMemoryUserRepository::default();
        let new_user = |email: &str| NewUser {
            name: "Ana".to_string(),
            email: email.to_string(),
            password_hash: "x".to_string(),
            role: Role::Customer,
        };
        let id = repo.create(new_user("ana@example.com")).unwrap();
        repo.create(new_user("bia@example.com")).unwrap();

        let mut user = repo.find_by_id(id).unwrap().unwrap();
        let created_at = user.created_at;
        user.role = Role::Employee;
        repo.update(user.clone()).unwrap();
        let stored = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(stored.role, Role::Employee);
        assert_eq!(stored.created_at, created_at);

        user.email = "bia@example.com".to_string();
        assert!(matches!(repo.update(user.clone()), Err(DomainError::Conflict(_))));

        user.id = 99;
        user.email = "ghost@example.com".to_string();
        assert!(matches!(repo.update(user), Err(DomainError::NotFound(_))));
    }
}
