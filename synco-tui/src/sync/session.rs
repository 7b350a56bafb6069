use crate::app::TextInput;

/// One open edit of one field.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    original_text: String,
    pub buffer: TextInput,
}

impl EditSession {
    /// Snapshot `text` and prime a fully selected buffer with it.
    pub fn open(text: &str) -> Self {
        Self {
            original_text: text.to_string(),
            buffer: TextInput::selected(text),
        }
    }

    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    pub fn trimmed_buffer(&self) -> &str {
        self.buffer.value.trim()
    }

    pub(super) fn into_original_text(self) -> String {
        self.original_text
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(super) enum FieldState {
    Editing(EditSession),
    Committing(EditSession),
}

impl FieldState {
    pub(super) fn session(&self) -> &EditSession {
        match self {
            FieldState::Editing(s) | FieldState::Committing(s) => s,
        }
    }

    pub(super) fn phase(&self) -> FieldPhase {
        match self {
            FieldState::Editing(_) => FieldPhase::Editing,
            FieldState::Committing(_) => FieldPhase::Committing,
        }
    }
}

/// Where a field is in its edit cycle. Fields without a session are in
/// `Display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPhase {
    Display,
    Editing,
    Committing,
}
