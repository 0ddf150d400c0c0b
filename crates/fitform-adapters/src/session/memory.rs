//! In-memory session store for testing.

use std::sync::{Arc, PoisonError, RwLock};

use fitform_core::application::ApplicationResult;
use fitform_core::application::ports::{Session, SessionStore};

/// Shares its slot between clones, so a test can hand one clone to the
/// context and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    slot: Arc<RwLock<Option<Session>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(session))),
        }
    }

    /// Current contents (testing helper).
    pub fn current(&self) -> Option<Session> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> ApplicationResult<Option<Session>> {
        Ok(self.current())
    }

    fn save(&self, session: &Session) -> ApplicationResult<()> {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> ApplicationResult<()> {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
