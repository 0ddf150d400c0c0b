//! Shared client state: session, notifications and the submit guard.
//!
//! One `AppContext` lives for the whole run and is handed to every service.
//! Nothing here is global.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::ports::{Session, SessionStore};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::Localizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast-style message queued for the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

pub struct AppContext {
    store: Arc<dyn SessionStore>,
    session: RwLock<Option<Session>>,
    notifications: Mutex<Vec<Notification>>,
    submitting: AtomicBool,
    localizer: Localizer,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("signed_in", &self.is_signed_in())
            .field("submitting", &self.is_submitting())
            .field("localizer", &self.localizer)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build the context and restore any persisted session.
    ///
    /// A store that fails to load is treated as signed out.
    pub fn start(store: Arc<dyn SessionStore>) -> Self {
        let session = match store.load() {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Could not restore session, starting signed out");
                None
            }
        };
        if let Some(s) = &session {
            debug!(email = %s.email, "Session restored");
        }
        Self {
            store,
            session: RwLock::new(session),
            notifications: Mutex::new(Vec::new()),
            submitting: AtomicBool::new(false),
            localizer: Localizer::default(),
        }
    }

    pub fn with_localizer(mut self, localizer: Localizer) -> Self {
        self.localizer = localizer;
        self
    }

    pub fn localizer(&self) -> Localizer {
        self.localizer
    }

    // -------------------------------------------------------------------------
    // Session
    // -------------------------------------------------------------------------

    pub fn session(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Bearer token of the current session.
    pub fn token(&self) -> ApplicationResult<String> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|s| s.token.clone())
            .ok_or(ApplicationError::NotAuthenticated)
    }

    /// Persist and activate a session.
    pub fn sign_in(&self, session: Session) -> ApplicationResult<()> {
        self.store.save(&session)?;
        info!(email = %session.email, "Signed in");
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        Ok(())
    }

    /// Drop the session everywhere and clear pending notifications.
    pub fn logout(&self) -> ApplicationResult<()> {
        let previous = self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.store.clear()?;
        if let Some(s) = previous {
            info!(email = %s.email, "Signed out");
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------------

    /// Queue a message. Known messages are translated on the way in.
    pub fn notify(&self, level: NotificationLevel, message: &str) -> Uuid {
        let notification = Notification {
            id: Uuid::new_v4(),
            level,
            message: self.localizer.translate(message).into_owned(),
            created_at: Utc::now(),
        };
        let id = notification.id;
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
        id
    }

    pub fn drain_notifications(&self) -> Vec<Notification> {
        std::mem::take(
            &mut *self
                .notifications
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    // -------------------------------------------------------------------------
    // Submit guard
    // -------------------------------------------------------------------------

    /// Claim the submit slot. The slot is released when the ticket drops.
    pub fn try_begin_submit(&self) -> ApplicationResult<SubmitTicket<'_>> {
        self.submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ApplicationError::SubmissionInProgress)?;
        Ok(SubmitTicket {
            flag: &self.submitting,
        })
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    // -------------------------------------------------------------------------
    // Error reporting
    // -------------------------------------------------------------------------

    /// Turn any failure into the one localized line the user sees, and queue
    /// it as an error notification.
    ///
    /// A rejected token ends the session.
    pub fn report(&self, error: &ApplicationError) -> String {
        let message = self
            .localizer
            .message_or_generic(error.user_message().as_deref());

        match error {
            ApplicationError::Validation(_) => debug!(error = %error, "Form rejected"),
            _ => warn!(error = %error, category = ?error.category(), "Operation failed"),
        }

        if matches!(error, ApplicationError::Api(api) if api.is_unauthorized()) {
            *self.session.write().unwrap_or_else(PoisonError::into_inner) = None;
            if let Err(e) = self.store.clear() {
                warn!(error = %e, "Could not clear rejected session");
            }
        }

        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notification {
                id: Uuid::new_v4(),
                level: NotificationLevel::Error,
                message: message.clone(),
                created_at: Utc::now(),
            });
        message
    }

    /// Report the error of a failed result and hand the result back.
    pub fn reported<T>(&self, result: ApplicationResult<T>) -> ApplicationResult<T> {
        if let Err(e) = &result {
            self.report(e);
        }
        result
    }
}

/// Holds the submit slot while alive.
#[derive(Debug)]
#[must_use = "the submit slot is released as soon as the ticket is dropped"]
pub struct SubmitTicket<'a> {
    flag: &'a AtomicBool,
}

impl Drop for SubmitTicket<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
