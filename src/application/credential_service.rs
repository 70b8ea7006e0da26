use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use std::sync::OnceLock;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::auth::Claims;
use crate::domain::errors::DomainError;
use crate::domain::ports::UserRepository;
use crate::domain::user::{normalize_email, Role};

/// Signing secret and lifetime for session tokens.
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub ttl: Duration,
}

/// Hash a password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DomainError::Internal(format!("password hashing failed: {e}")))
}

/// Check `password` against a stored PHC hash. A malformed hash never matches.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Hash checked when the email is unknown, so that path costs one Argon2
/// verification like a wrong password does.
fn decoy_hash() -> &'static str {
    static DECOY: OnceLock<String> = OnceLock::new();
    DECOY.get_or_init(|| {
        hash_password("decoy password, never issued").unwrap_or_else(|e| {
            log::error!("Could not prepare decoy hash: {}", e);
            String::new()
        })
    })
}

/// Sign an HS256 token binding `user_id` and `role`, valid for `ttl`.
pub fn issue_token(
    user_id: i64,
    role: Role,
    secret: &str,
    ttl: Duration,
) -> Result<String, DomainError> {
    if secret.is_empty() {
        return Err(DomainError::MisconfiguredSecret);
    }

    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        role,
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| DomainError::Internal(format!("failed to sign token: {e}")))
}

/// Check signature and expiry and return the token's claims.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, DomainError> {
    if secret.is_empty() {
        return Err(DomainError::MisconfiguredSecret);
    }

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        log::debug!("Rejected token: {}", e);
        DomainError::InvalidToken
    })
}

pub struct CredentialService<R> {
    users: R,
    tokens: TokenSettings,
}

impl<R: UserRepository> CredentialService<R> {
    pub fn new(users: R, tokens: TokenSettings) -> Self {
        Self { users, tokens }
    }

    /// Exchange an email and password for a session token.
    ///
    /// Unknown users, malformed stored hashes and wrong passwords all fail
    /// with the same `InvalidCredentials`.
    pub fn login(&self, email: &str, password: &str) -> Result<String, DomainError> {
        let email = normalize_email(email);
        let password = password.trim();
        if password.is_empty() {
            return Err(DomainError::InvalidCredentials);
        }

        let Some(user) = self.users.find_by_email(&email)? else {
            verify_password(password, decoy_hash());
            log::info!("Login rejected: no such user");
            return Err(DomainError::InvalidCredentials);
        };

        if PasswordHash::new(&user.password_hash).is_err() {
            verify_password(password, decoy_hash());
            log::warn!("Login rejected: stored hash for user {} is malformed", user.id);
            return Err(DomainError::InvalidCredentials);
        }

        if !verify_password(password, &user.password_hash) {
            log::info!("Login rejected: wrong password for user {}", user.id);
            return Err(DomainError::InvalidCredentials);
        }

        let token = issue_token(user.id, user.role, &self.tokens.secret, self.tokens.ttl)?;
        log::info!("User {} logged in", user.id);
        Ok(token)
    }

    pub fn authenticate(&self, token: &str) -> Result<Claims, DomainError> {
        verify_token(token, &self.tokens.secret)
    }
}
