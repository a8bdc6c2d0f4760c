//! API middleware components

pub mod logging;
pub mod security;
pub mod session_auth;

pub use logging::logging_middleware;
pub use security::{security_headers_middleware, vary_authorization_middleware};
pub use session_auth::RequireSession;
