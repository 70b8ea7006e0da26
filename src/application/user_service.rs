use crate::domain::errors::DomainError;
use crate::domain::ports::UserRepository;
use crate::domain::user::{
    normalize_email, validate_email, NewUser, User, UserChanges, UserDraft,
};

use super::credential_service::hash_password;

pub struct UserService<R> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validate the draft, hash its password and store the new user.
    pub fn register(&self, draft: UserDraft) -> Result<i64, DomainError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidInput("name cannot be empty".to_string()));
        }
        let email = normalize_email(&draft.email);
        validate_email(&email)?;
        let password = draft.password.trim();
        if password.is_empty() {
            return Err(DomainError::InvalidInput(
                "password cannot be empty".to_string(),
            ));
        }

        if self.repo.find_by_email(&email)?.is_some() {
            return Err(DomainError::Conflict("email already in use".to_string()));
        }

        let id = self.repo.create(NewUser {
            name: name.to_string(),
            email,
            password_hash: hash_password(password)?,
            role: draft.role,
        })?;
        log::info!("Registered user {} with role {}", id, draft.role);
        Ok(id)
    }

    pub fn get_user(&self, id: i64) -> Result<User, DomainError> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| DomainError::NotFound(format!("User {id}")))
    }

    pub fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.repo.list()
    }

    /// Apply `changes` to user `id`. A new email is normalized and checked
    /// like at registration; a new password is hashed again.
    pub fn update_user(&self, id: i64, changes: UserChanges) -> Result<(), DomainError> {
        let mut user = self.get_user(id)?;

        if let Some(name) = changes.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(DomainError::InvalidInput("name cannot be empty".to_string()));
            }
            user.name = name.to_string();
        }

        if let Some(email) = changes.email {
            let email = normalize_email(&email);
            validate_email(&email)?;
            if email != user.email {
                if let Some(other) = self.repo.find_by_email(&email)? {
                    if other.id != id {
                        return Err(DomainError::Conflict("email already in use".to_string()));
                    }
                }
            }
            user.email = email;
        }

        if let Some(password) = changes.password {
            let password = password.trim();
            if password.is_empty() {
                return Err(DomainError::InvalidInput(
                    "password cannot be empty".to_string(),
                ));
            }
            user.password_hash = hash_password(password)?;
        }

        if let Some(role) = changes.role {
            user.role = role;
        }

        let role = user.role;
        self.repo.update(user)?;
        log::info!("Updated user {} (role {})", id, role);
        Ok(())
    }

    pub fn delete_user(&self, id: i64) -> Result<(), DomainError> {
        self.repo.delete(id)
    }
}
