use std::sync::{Arc, Mutex, MutexGuard};

use crate::client::FeedApi;
use crate::config::{FEED_CONTAINER, PROFILE_CONTAINER};
use crate::core::errors::ApiError;
use crate::core::inflight::{InFlight, InFlightGuard};
use crate::document::{Dialogs, Document};
use crate::models::models::User;
use crate::session::Session;

/// Result of one UI action. Failures have already been surfaced to the
/// user (notice, alert or log) by the time this is returned.
#[derive(Debug)]
pub enum Outcome {
    Completed,
    Skipped(Skip),
    Failed(ApiError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    NoSession,
    NotMounted,
    EmptyInput,
    /// Client-side validation failed; carries the message shown.
    Invalid(&'static str),
    Cancelled,
    /// The same action is still waiting on the backend.
    InFlight,
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }

    pub fn skipped(&self) -> Option<&Skip> {
        match self {
            Outcome::Skipped(skip) => Some(skip),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Outcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Everything a renderer or handler needs: backend, session, dialogs and
/// the document. Passed explicitly to every operation.
pub struct App {
    api: Arc<dyn FeedApi>,
    session: Session,
    dialogs: Arc<dyn Dialogs>,
    document: Mutex<Document>,
    inflight: InFlight,
}

impl App {
    pub fn new(api: Arc<dyn FeedApi>, session: Session, dialogs: Arc<dyn Dialogs>) -> Self {
        Self {
            api,
            session,
            dialogs,
            document: Mutex::new(Document::new()),
            inflight: InFlight::new(),
        }
    }

    pub fn api(&self) -> &dyn FeedApi {
        self.api.as_ref()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn dialogs(&self) -> &dyn Dialogs {
        self.dialogs.as_ref()
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }

    /// Lock the document for inspection. Never hold across an `.await`.
    pub fn document(&self) -> MutexGuard<'_, Document> {
        self.document.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn with_document<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        let mut doc = self.document();
        f(&mut *doc)
    }

    pub(crate) fn begin(&self, key: String) -> Option<InFlightGuard> {
        let guard = self.inflight.try_begin(key.clone());
        if guard.is_none() {
            log::debug!("Ignoring {}: already in flight", key);
        }
        guard
    }

    /// Re-fetch whichever post lists are mounted.
    pub async fn rerender(&self) {
        let (feed, profile) = self.with_document(|doc| {
            (doc.is_mounted(FEED_CONTAINER), doc.is_mounted(PROFILE_CONTAINER))
        });

        if feed {
            crate::posts::render_posts(self).await;
        }
        if profile {
            crate::users::update_profile_page(self).await;
        }
    }
}
