//! Identity domain
//!
//! Identities are owned by an external directory; the session subsystem only
//! reads them.

mod directory;
mod entity;

pub use directory::IdentityDirectory;
pub use entity::{Identity, IdentityId};

#[cfg(test)]
pub use directory::MockIdentityDirectory;
