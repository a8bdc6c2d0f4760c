//! Infrastructure layer - session implementation, identity directory, logging

pub mod identity;
pub mod logging;
pub mod session;
