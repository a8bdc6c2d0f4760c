//! Identity directory trait

use async_trait::async_trait;

use super::entity::{Identity, IdentityId};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// External collaborator that owns user records.
///
/// Password policy lives entirely behind `authenticate`: the session layer
/// only sees whether the credentials matched.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Check credentials, returning the identity on a match
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Identity>, DomainError>;

    /// Resolve a token subject to an identity
    async fn find_by_id(&self, id: IdentityId) -> Result<Option<Identity>, DomainError>;
}
