//! Session domain
//!
//! Claim sets, token pairs and the failure taxonomy shared by issuance and
//! verification.

mod claims;
mod failure;
mod token;

pub use claims::{AccessClaims, ClaimSet, RefreshClaims, TOKEN_TYPE};
pub use failure::AuthFailure;
pub use token::TokenPair;
