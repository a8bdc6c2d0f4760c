//! Application state shared by every handler

use std::sync::Arc;

use crate::domain::IdentityDirectory;
use crate::infrastructure::session::SessionService;

/// Session core plus the directory that resolves identities
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionService>,
    pub directory: Arc<dyn IdentityDirectory>,
}

impl AppState {
    pub fn new(sessions: SessionService, directory: Arc<dyn IdentityDirectory>) -> Self {
        Self {
            sessions: Arc::new(sessions),
            directory,
        }
    }
}
