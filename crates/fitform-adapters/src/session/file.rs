//! Session file adapter using std::fs and serde_json.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use fitform_core::application::{ApplicationError, ApplicationResult};
use fitform_core::application::ports::{Session, SessionStore};

/// Stores the session as a JSON file, typically
/// `~/.local/share/fitform/session.json`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> ApplicationResult<Option<Session>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(map_io_error(&self.path, e, "read session")),
        };
        let session = serde_json::from_str(&raw).map_err(|e| {
            ApplicationError::session_store(format!(
                "{} is not a valid session file: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> ApplicationResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| map_io_error(parent, e, "create directory"))?;
        }
        let json = serde_json::to_string_pretty(session)
            .map_err(ApplicationError::session_store)?;
        std::fs::write(&self.path, json).map_err(|e| map_io_error(&self.path, e, "write session"))?;
        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    fn clear(&self) -> ApplicationResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io_error(&self.path, e, "remove session")),
        }
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ApplicationError {
    ApplicationError::session_store(format!(
        "Failed to {} at {}: {}",
        operation,
        path.display(),
        e
    ))
}
