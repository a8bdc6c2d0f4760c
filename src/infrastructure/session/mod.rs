//! Token-based session subsystem
//!
//! Everything here is synchronous and CPU-bound over an immutable
//! [`SessionConfig`]; only the directory-facing flows in [`SessionService`]
//! are async.

mod config;
mod cookie;
mod issuer;
mod service;
mod verifier;

pub use config::{SessionConfig, SigningSecret};
pub use cookie::{CookieDescriptor, RefreshCookieManager, SameSite};
pub use issuer::{TokenIssuer, SIGNING_ALGORITHM};
pub use service::{IssuedSession, SessionService};
pub use verifier::{TokenVerifier, BEARER_SCHEME};
