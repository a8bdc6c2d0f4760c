//! Identity directory implementations

mod in_memory;
mod password;

pub use in_memory::InMemoryIdentityDirectory;
pub use password::{Argon2Hasher, PasswordHasher};
