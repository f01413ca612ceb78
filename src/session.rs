// src/session.rs
//! Root controller: the editable record, the chosen layout, the pending
//! generation flag and the last user-facing error.
//!
//! `Session` transitions are pure (old state in, new state out). `SessionStore`
//! owns the live session behind a mutex that is never held across an await.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::app_log;
use crate::core::augment::{Augmentation, AugmentationClient, AugmentationFailed, FAILURE_MESSAGE};
use crate::core::editor::{self, EditError, FieldEdit};
use crate::core::layout::Layout;
use crate::types::{ResumeData, Section};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("a generation request is already in progress")]
    GenerationInProgress,
}

/// One user action against the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    UpdateField(FieldEdit),
    AddEntry(Section),
    RemoveEntry { section: Section, id: String },
    SelectLayout(Layout),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub record: ResumeData,
    pub layout: Layout,
    pub generating: bool,
    pub error: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ResumeData::demo())
    }
}

impl Session {
    pub fn new(record: ResumeData) -> Self {
        Self {
            record,
            layout: Layout::default(),
            generating: false,
            error: None,
            updated_at: Utc::now(),
        }
    }

    /// Apply an edit. Returns the next session and, for `AddEntry`, the new
    /// entry's identifier. On error `self` is untouched.
    pub fn apply(&self, action: &EditAction) -> Result<(Session, Option<String>), EditError> {
        let mut next = self.clone();
        let mut new_id = None;

        match action {
            EditAction::UpdateField(edit) => next.record = editor::update_field(&self.record, edit)?,
            EditAction::AddEntry(section) => {
                let (record, id) = editor::add_entry(&self.record, *section)?;
                next.record = record;
                new_id = Some(id);
            }
            EditAction::RemoveEntry { section, id } => {
                next.record = editor::remove_entry(&self.record, *section, id)?
            }
            EditAction::SelectLayout(layout) => next.layout = *layout,
        }

        next.updated_at = Utc::now();
        Ok((next, new_id))
    }

    /// Mark a generation as pending and clear the previous error.
    pub fn begin_generation(&self) -> Result<Session, SessionError> {
        if self.generating {
            return Err(SessionError::GenerationInProgress);
        }

        Ok(Session {
            generating: true,
            error: None,
            updated_at: Utc::now(),
            ..self.clone()
        })
    }

    /// Fold the outcome into the record as it is now. Success replaces summary
    /// and skills; failure leaves the record alone and sets the generic message.
    pub fn finish_generation(&self, outcome: Result<Augmentation, AugmentationFailed>) -> Session {
        let mut next = Session {
            generating: false,
            updated_at: Utc::now(),
            ..self.clone()
        };

        match outcome {
            Ok(augmentation) => next.record = self.record.merge_augmentation(&augmentation),
            Err(AugmentationFailed) => next.error = Some(FAILURE_MESSAGE.to_string()),
        }

        next
    }
}

pub struct SessionStore {
    inner: Mutex<Session>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Session::default())
    }
}

/// Clears the pending flag when the generation future completes or is dropped.
struct PendingGuard<'a> {
    store: &'a SessionStore,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.store.lock().generating = false;
    }
}

impl SessionStore {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> Session {
        self.lock().clone()
    }

    pub fn apply(&self, action: &EditAction) -> Result<(Session, Option<String>), SessionError> {
        let mut current = self.lock();
        let (next, new_id) = current.apply(action)?;
        *current = next.clone();
        Ok((next, new_id))
    }

    /// Run one augmentation against the current record. A second call while
    /// one is pending fails with `GenerationInProgress`.
    pub async fn generate(&self, client: &AugmentationClient) -> Result<Session, SessionError> {
        let record = {
            let mut current = self.lock();
            let next = current.begin_generation()?;
            *current = next;
            current.record.clone()
        };
        let _pending = PendingGuard { store: self };

        app_log!(info, "Generation started for '{}'", record.personal.name);
        let outcome = client.generate_summary_and_skills(&record).await;

        let mut current = self.lock();
        let next = current.finish_generation(outcome);
        *current = next.clone();
        drop(current);

        app_log!(
            info,
            "Generation finished: {}",
            if next.error.is_some() { "failed" } else { "ok" }
        );
        Ok(next)
    }
}
