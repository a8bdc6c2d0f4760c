//! Password hashing for the in-memory directory, using Argon2

use argon2::{
    password_hash::{PasswordHash, PasswordHasher as Argon2PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Hashes and checks directory passwords.
///
/// Only the identity directory uses this; sessions never see passwords.
pub trait PasswordHasher: Send + Sync + Debug {
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Constant-time match of `password` against a PHC string
    fn verify(&self, password: &str, hash: &str) -> bool;

    /// Whether `hash` is a parseable PHC string
    fn is_valid_hash(&self, hash: &str) -> bool;
}

#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    fn is_valid_hash(&self, hash: &str) -> bool {
        PasswordHash::new(hash).is_ok()
    }
}
