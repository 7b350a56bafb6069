mod state;
mod tasks;

use synco_api::domain::{Group, Task, TaskId, TaskScope};

use crate::sync::FieldSynchronizer;

pub use state::{SessionStatus, TextInput, View};

pub struct App {
    pub running: bool,
    /// Set by quit; the loop exits once no edit is still open.
    pub quit_requested: bool,
    pub status_message: Option<String>,
    pub current_view: View,
    pub session_status: SessionStatus,
    pub dev_mode: bool,

    // Task list for the current scope
    pub tasks: Vec<Task>,
    pub scope: TaskScope,
    pub groups: Vec<Group>,
    pub focused_index: Option<usize>,

    // Inline text editing
    pub sync: FieldSynchronizer,

    // Add task input
    pub new_task_input: TextInput,

    // Delete confirmation
    pub pending_delete: Option<TaskId>,

    // Loading indicator
    pub is_loading: bool,
    pub throbber_state: throbber_widgets_tui::ThrobberState,
}

impl App {
    pub fn new(dev_mode: bool) -> Self {
        Self {
            running: true,
            quit_requested: false,
            status_message: None,
            current_view: View::Tasks,
            session_status: SessionStatus::SignedIn,
            dev_mode,
            tasks: Vec::new(),
            scope: TaskScope::All,
            groups: Vec::new(),
            focused_index: None,
            sync: FieldSynchronizer::new(),
            new_task_input: TextInput::new(),
            pending_delete: None,
            is_loading: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    /// Stop the loop once a requested quit has no open edits left.
    pub fn finish_quit_if_idle(&mut self) {
        if self.quit_requested && !self.sync.has_open_fields() {
            self.running = false;
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn mark_signed_out(&mut self) {
        self.session_status = SessionStatus::SignedOut;
    }

    pub fn focused_task(&self) -> Option<&Task> {
        self.focused_index.and_then(|i| self.tasks.get(i))
    }

    pub fn focused_task_id(&self) -> Option<TaskId> {
        self.focused_task().and_then(|t| t.id)
    }

    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == Some(id))
    }

    /// Keep the focus inside the list after it changed size.
    fn clamp_focus(&mut self) {
        self.focused_index = match (self.focused_index, self.tasks.len()) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), len) => Some(i.min(len - 1)),
        };
    }

    pub fn move_focus(&mut self, up: bool) {
        let len = self.tasks.len();
        if len == 0 {
            self.focused_index = None;
            return;
        }
        self.focused_index = Some(match self.focused_index {
            None => 0,
            Some(i) if up => i.saturating_sub(1),
            Some(i) => (i + 1).min(len - 1),
        });
    }

    pub fn set_groups(&mut self, groups: Vec<Group>) {
        // A scope pointing at a group that disappeared falls back to all tasks.
        if let TaskScope::Group(id) = self.scope {
            if !groups.iter().any(|g| g.id == id) {
                self.scope = TaskScope::All;
            }
        }
        self.groups = groups;
    }

    /// All -> Personal -> each group -> All.
    pub fn next_scope(&self) -> TaskScope {
        match self.scope {
            TaskScope::All => TaskScope::Personal,
            TaskScope::Personal => self
                .groups
                .first()
                .map(|g| TaskScope::Group(g.id))
                .unwrap_or(TaskScope::All),
            TaskScope::Group(id) => {
                let pos = self.groups.iter().position(|g| g.id == id);
                pos.and_then(|p| self.groups.get(p + 1))
                    .map(|g| TaskScope::Group(g.id))
                    .unwrap_or(TaskScope::All)
            }
        }
    }

    pub fn scope_label(&self) -> String {
        match self.scope {
            TaskScope::All => "All tasks".to_string(),
            TaskScope::Personal => "Personal".to_string(),
            TaskScope::Group(id) => self
                .groups
                .iter()
                .find(|g| g.id == id)
                .map(|g| g.name.clone())
                .unwrap_or_else(|| format!("Group {}", id)),
        }
    }

    pub fn group_name(&self, task: &Task) -> Option<&str> {
        let id = task.group?;
        self.groups
            .iter()
            .find(|g| g.id == id)
            .map(|g| g.name.as_str())
    }
}
