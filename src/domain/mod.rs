//! Domain layer - session types, identities and errors

pub mod error;
pub mod identity;
pub mod session;

pub use error::DomainError;
pub use identity::{Identity, IdentityDirectory, IdentityId};
pub use session::{AccessClaims, AuthFailure, ClaimSet, RefreshClaims, TokenPair, TOKEN_TYPE};
