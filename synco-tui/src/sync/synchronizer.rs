use std::collections::HashMap;
use synco_api::domain::{Task, TaskId, UpdateTask};

use super::session::{EditSession, FieldPhase, FieldState};
use super::SyncError;
use crate::api::ClientError;
use crate::app::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Opened,
    /// The field already had a session; nothing changed.
    AlreadyOpen,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Commit {
    /// The text did not change. The field is back in `Display` and no
    /// request is needed.
    Unchanged,
    /// The field is now `Committing`. Send the update and hand the result to
    /// [`FieldSynchronizer::resolve`].
    Pending(TaskId, UpdateTask),
}

/// Owns every open edit session, keyed by the edited task.
#[derive(Debug, Default)]
pub struct FieldSynchronizer {
    fields: HashMap<TaskId, FieldState>,
}

impl FieldSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self, id: TaskId) -> FieldPhase {
        self.fields
            .get(&id)
            .map(FieldState::phase)
            .unwrap_or(FieldPhase::Display)
    }

    pub fn session(&self, id: TaskId) -> Option<&EditSession> {
        self.fields.get(&id).map(FieldState::session)
    }

    pub fn has_open_fields(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Fields currently in `Editing`, in id order.
    pub fn editing_fields(&self) -> Vec<TaskId> {
        let mut ids: Vec<TaskId> = self
            .fields
            .iter()
            .filter(|(_, state)| state.phase() == FieldPhase::Editing)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    /// Open an edit session on `item`'s text.
    ///
    /// Re-activating a field that is editing or committing is a no-op.
    pub fn activate(&mut self, item: &Task) -> Result<Activation, SyncError> {
        let id = item.id.ok_or(SyncError::Unpersisted)?;
        if self.fields.contains_key(&id) {
            return Ok(Activation::AlreadyOpen);
        }

        self.fields
            .insert(id, FieldState::Editing(EditSession::open(&item.text)));
        tracing::debug!("editing task {}", id);
        Ok(Activation::Opened)
    }

    /// The edit buffer of a field in `Editing`.
    pub fn buffer_mut(&mut self, id: TaskId) -> Option<&mut TextInput> {
        match self.fields.get_mut(&id) {
            Some(FieldState::Editing(session)) => Some(&mut session.buffer),
            _ => None,
        }
    }

    /// What the field for `item` shows right now: the buffer while editing,
    /// the item's text otherwise.
    pub fn displayed_text<'a>(&'a self, item: &'a Task) -> &'a str {
        match item.id.and_then(|id| self.fields.get(&id)) {
            Some(FieldState::Editing(session)) => &session.buffer.value,
            _ => &item.text,
        }
    }

    /// Leave `Editing`.
    ///
    /// Blank input is rejected and changes nothing; unchanged input ends the
    /// session without a request. Anything else is applied to `item`
    /// optimistically and returned as the update to send.
    pub fn commit(&mut self, item: &mut Task) -> Result<Commit, SyncError> {
        let id = item.id.ok_or(SyncError::Unpersisted)?;
        let session = match self.fields.remove(&id) {
            Some(FieldState::Editing(session)) => session,
            Some(other) => {
                self.fields.insert(id, other);
                return Err(SyncError::NotEditing(id));
            }
            None => return Err(SyncError::NotEditing(id)),
        };

        let text = session.trimmed_buffer().to_string();
        if text.is_empty() {
            item.text = session.into_original_text();
            return Err(SyncError::Validation);
        }
        if text == session.original_text() {
            item.text = session.into_original_text();
            return Ok(Commit::Unchanged);
        }

        let update = UpdateTask::with_text(item, text.as_str());
        item.text = text;
        self.fields.insert(id, FieldState::Committing(session));
        tracing::debug!("saving task {}", id);
        Ok(Commit::Pending(id, update))
    }

    /// Finish a `Committing` field with the server's answer.
    ///
    /// On success the server's text and completion state win. On failure the
    /// item goes back to the text it had before the edit.
    pub fn resolve(
        &mut self,
        item: &mut Task,
        outcome: Result<Task, ClientError>,
    ) -> Result<(), SyncError> {
        let id = item.id.ok_or(SyncError::Unpersisted)?;
        let session = match self.fields.remove(&id) {
            Some(FieldState::Committing(session)) => session,
            Some(other) => {
                self.fields.insert(id, other);
                return Err(SyncError::NotCommitting(id));
            }
            None => return Err(SyncError::NotCommitting(id)),
        };

        match outcome {
            Ok(server) => {
                item.text = server.text;
                item.completed = server.completed;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("rolling back task {}: {}", id, e);
                item.text = session.into_original_text();
                Err(SyncError::from_client(e))
            }
        }
    }

    /// Forget the session of a field whose task no longer exists.
    pub fn discard(&mut self, id: TaskId) -> bool {
        self.fields.remove(&id).is_some()
    }
}
