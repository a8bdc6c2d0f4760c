//! In-memory identity directory

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::password::{Argon2Hasher, PasswordHasher};
use crate::config::SeedUser;
use crate::domain::{DomainError, Identity, IdentityDirectory, IdentityId};

/// Argon2id hash of no known password; checked when the email is unknown
const UNKNOWN_EMAIL_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$Y0ea1poJCyWCd+yPum+ZQQ$diBpvAem4bXfEjpa572RwQ2qBGlPuqF/ugzWqNzOjyI";

#[derive(Debug, Clone)]
struct DirectoryEntry {
    identity: Identity,
    password_hash: String,
}

/// Identity directory kept in process memory, keyed by id and by email
#[derive(Debug)]
pub struct InMemoryIdentityDirectory {
    entries: Arc<RwLock<HashMap<IdentityId, DirectoryEntry>>>,
    email_index: Arc<RwLock<HashMap<String, IdentityId>>>,
    hasher: Arc<dyn PasswordHasher>,
}

impl InMemoryIdentityDirectory {
    pub fn new() -> Self {
        Self::with_hasher(Arc::new(Argon2Hasher::new()))
    }

    pub fn with_hasher(hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            email_index: Arc::new(RwLock::new(HashMap::new())),
            hasher,
        }
    }

    /// Build a directory from configured users whose passwords are already hashed
    pub async fn from_seed(users: &[SeedUser]) -> Result<Self, DomainError> {
        let directory = Self::new();

        for user in users {
            if !directory.hasher.is_valid_hash(&user.password_hash) {
                return Err(DomainError::configuration(format!(
                    "directory user {} has an invalid password hash",
                    user.id
                )));
            }

            let identity = Identity::new(user.id, &user.first_name, &user.last_name);
            directory
                .insert_hashed(identity, &user.email, user.password_hash.clone())
                .await?;
        }

        Ok(directory)
    }

    /// Register an identity with a plaintext password
    pub async fn register(
        &self,
        identity: Identity,
        email: &str,
        password: &str,
    ) -> Result<(), DomainError> {
        let hash = self.hasher.hash(password)?;
        self.insert_hashed(identity, email, hash).await
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    async fn insert_hashed(
        &self,
        identity: Identity,
        email: &str,
        password_hash: String,
    ) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        let mut email_index = self.email_index.write().await;

        let id = identity.id();
        let email = normalize_email(email);

        if entries.contains_key(&id) {
            return Err(DomainError::conflict(format!("Identity {} already exists", id)));
        }

        if email_index.contains_key(&email) {
            return Err(DomainError::conflict(format!(
                "Email '{}' already registered",
                email
            )));
        }

        email_index.insert(email, id);
        entries.insert(
            id,
            DirectoryEntry {
                identity,
                password_hash,
            },
        );

        Ok(())
    }
}

impl Default for InMemoryIdentityDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityDirectory for InMemoryIdentityDirectory {
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Identity>, DomainError> {
        let id = self
            .email_index
            .read()
            .await
            .get(&normalize_email(email))
            .copied();

        let Some(id) = id else {
            debug!("Login attempt for unknown email");
            self.hasher.verify(password, UNKNOWN_EMAIL_HASH);
            return Ok(None);
        };

        let entry = self.entries.read().await.get(&id).cloned();

        Ok(entry
            .filter(|entry| self.hasher.verify(password, &entry.password_hash))
            .map(|entry| entry.identity))
    }

    async fn find_by_id(&self, id: IdentityId) -> Result<Option<Identity>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries.get(&id).map(|entry| entry.identity.clone()))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
