use super::*;
use synco_api::domain::{GroupId, UpdateTask};

use crate::api::ClientError;
use crate::sync::{Activation, Commit, FieldPhase, SyncError};

impl App {
    fn in_scope(&self, task: &Task) -> bool {
        match self.scope {
            TaskScope::All => true,
            TaskScope::Personal => task.is_personal(),
            TaskScope::Group(id) => task.group == Some(id),
        }
    }

    /// Replace the list with a fresh server snapshot, keeping focus on the
    /// same task when it is still there.
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        let focused = self.focused_task_id();
        self.tasks = tasks;

        for id in self.sync.editing_fields() {
            if self.task_mut(id).is_none() {
                self.sync.discard(id);
            }
        }

        self.focused_index =
            focused.and_then(|id| self.tasks.iter().position(|t| t.id == Some(id)));
        self.clamp_focus();
    }

    /// Show a task the server just created. Newest tasks go first.
    pub fn insert_created(&mut self, task: Task) {
        if self.in_scope(&task) {
            self.tasks.insert(0, task);
            self.focused_index = Some(0);
        }
    }

    /// Swap in the server's version of a task.
    pub fn apply_server_task(&mut self, task: Task) {
        let Some(id) = task.id else {
            return;
        };
        if let Some(existing) = self.task_mut(id) {
            *existing = task;
        }
    }

    pub fn remove_task(&mut self, id: TaskId) {
        self.tasks.retain(|t| t.id != Some(id));
        self.sync.discard(id);
        self.clamp_focus();
    }

    /// The focused task's id if its text is being edited.
    pub fn editing_task_id(&self) -> Option<TaskId> {
        self.focused_task_id()
            .filter(|id| self.sync.phase(*id) == FieldPhase::Editing)
    }

    pub fn edit_buffer(&mut self) -> Option<&mut TextInput> {
        let id = self.editing_task_id()?;
        self.sync.buffer_mut(id)
    }

    /// Open the inline editor on the focused task.
    pub fn begin_edit(&mut self) {
        let Some(task) = self.focused_index.and_then(|i| self.tasks.get(i)) else {
            return;
        };
        match self.sync.activate(task) {
            Ok(Activation::Opened) => self.clear_status(),
            Ok(Activation::AlreadyOpen) => {}
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Leave edit mode on `id`. Returns the update to send when the text
    /// actually changed.
    pub fn commit_edit(&mut self, id: TaskId) -> Option<(TaskId, UpdateTask)> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == Some(id)) else {
            self.sync.discard(id);
            return None;
        };

        match self.sync.commit(task) {
            Ok(Commit::Unchanged) => None,
            Ok(Commit::Pending(id, update)) => Some((id, update)),
            Err(e) => {
                self.report_sync_error(e);
                None
            }
        }
    }

    /// Commit whatever the focused task is editing, e.g. before focus moves.
    pub fn commit_focused_edit(&mut self) -> Option<(TaskId, UpdateTask)> {
        let id = self.editing_task_id()?;
        self.commit_edit(id)
    }

    pub fn resolve_edit(&mut self, id: TaskId, outcome: Result<Task, ClientError>) {
        let result = match self.tasks.iter_mut().find(|t| t.id == Some(id)) {
            Some(task) => self.sync.resolve(task, outcome),
            None => {
                self.sync.discard(id);
                return;
            }
        };

        match result {
            Ok(()) => self.clear_status(),
            Err(e) => self.report_sync_error(e),
        }
    }

    pub fn report_sync_error(&mut self, e: SyncError) {
        if e.is_auth() {
            self.mark_signed_out();
        }
        self.set_status(e.to_string());
    }

    pub fn report_client_error(&mut self, context: &str, e: ClientError) {
        if e.is_auth() {
            self.mark_signed_out();
            self.set_status(format!(
                "{}: session expired or missing. Run `synco login` to sign in again.",
                context
            ));
            return;
        }
        self.set_status(format!("{}: {}", context, e));
    }

    /// Trimmed text of the add-task input, or `None` when it is blank.
    /// The input is cleared either way.
    pub fn take_new_task_text(&mut self) -> Option<String> {
        let text = self.new_task_input.value.trim().to_string();
        self.new_task_input.clear();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// New tasks land in the group currently shown.
    pub fn new_task_group(&self) -> Option<GroupId> {
        match self.scope {
            TaskScope::Group(id) => Some(id),
            _ => None,
        }
    }

    fn focused_idle_task(&self) -> Option<&Task> {
        self.focused_task()
            .filter(|t| t.id.is_some_and(|id| self.sync.phase(id) == FieldPhase::Display))
    }

    /// Update body flipping the focused task's completion state.
    pub fn toggle_update(&self) -> Option<(TaskId, UpdateTask)> {
        let task = self.focused_idle_task()?;
        Some((task.id?, UpdateTask::toggled(task)))
    }

    pub fn request_delete(&mut self) {
        match self.focused_idle_task().and_then(|t| t.id) {
            Some(id) => {
                self.pending_delete = Some(id);
                self.current_view = View::ConfirmDelete;
            }
            None if self.focused_task().is_some() => {
                self.set_status("Finish editing before deleting".to_string());
            }
            None => {}
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.current_view = View::Tasks;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synco_api::ApiError;

    fn task(id: i64, text: &str) -> Task {
        Task {
            id: Some(TaskId(id)),
            ..Task::new(text)
        }
    }

    fn app_with_tasks() -> App {
        let mut app = App::new(true);
        app.replace_tasks(vec![task(2, "buy bread"), task(1, "buy milk")]);
        app
    }

    fn type_into(app: &mut App, text: &str) {
        let buffer = app.edit_buffer().unwrap();
        buffer.clear();
        for c in text.chars() {
            buffer.insert(c);
        }
    }

    #[test]
    fn edit_commit_and_resolve_flow() {
        let mut app = app_with_tasks();
        app.begin_edit();
        assert_eq!(app.editing_task_id(), Some(TaskId(2)));

        type_into(&mut app, "buy rye bread");
        let (id, update) = app.commit_focused_edit().unwrap();
        assert_eq!(id, TaskId(2));
        assert_eq!(update.text, "buy rye bread");
        assert_eq!(app.editing_task_id(), None);

        app.resolve_edit(id, Ok(task(2, "buy rye bread")));
        assert_eq!(app.tasks[0].text, "buy rye bread");
        assert!(app.status_message.is_none());
    }

    #[test]
    fn blank_commit_reports_validation_error() {
        let mut app = app_with_tasks();
        app.begin_edit();
        type_into(&mut app, "  ");

        assert!(app.commit_focused_edit().is_none());
        assert_eq!(app.tasks[0].text, "buy bread");
        assert_eq!(
            app.status_message.as_deref(),
            Some("Task text cannot be empty")
        );
    }

    #[test]
    fn auth_failure_rolls_back_and_signs_out() {
        let mut app = app_with_tasks();
        app.begin_edit();
        type_into(&mut app, "buy rye bread");
        let (id, _) = app.commit_focused_edit().unwrap();

        app.resolve_edit(id, Err(ClientError::Api(ApiError::Unauthorized)));
        assert_eq!(app.tasks[0].text, "buy bread");
        assert_eq!(app.session_status, SessionStatus::SignedOut);
        assert!(app
            .status_message
            .as_deref()
            .is_some_and(|m| m.contains("synco login")));
    }

    #[test]
    fn permission_refusal_rolls_back_but_stays_signed_in() {
        let mut app = app_with_tasks();
        app.begin_edit();
        type_into(&mut app, "buy rye bread");
        let (id, _) = app.commit_focused_edit().unwrap();

        let refusal = ApiError::Rejected {
            status: 403,
            message: "You do not have permission to perform this action.".to_string(),
        };
        app.resolve_edit(id, Err(ClientError::Api(refusal)));

        assert_eq!(app.tasks[0].text, "buy bread");
        assert_eq!(app.session_status, SessionStatus::SignedIn);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Failed to save task: Rejected (403): You do not have permission to perform this action.")
        );
    }

    #[test]
    fn committing_task_cannot_be_toggled_or_deleted() {
        let mut app = app_with_tasks();
        app.begin_edit();
        type_into(&mut app, "buy rye bread");
        app.commit_focused_edit().unwrap();

        assert!(app.toggle_update().is_none());
        app.request_delete();
        assert_eq!(app.pending_delete, None);
        assert_eq!(app.current_view, View::Tasks);
    }

    #[test]
    fn reload_keeps_focus_on_the_same_task() {
        let mut app = app_with_tasks();
        app.move_focus(false);
        assert_eq!(app.focused_task_id(), Some(TaskId(1)));

        app.replace_tasks(vec![task(3, "new"), task(2, "buy bread"), task(1, "buy milk")]);
        assert_eq!(app.focused_task_id(), Some(TaskId(1)));
    }

    #[test]
    fn created_task_outside_scope_is_not_shown() {
        let mut app = app_with_tasks();
        app.scope = TaskScope::Personal;
        app.insert_created(Task {
            group: Some(GroupId(1)),
            ..task(3, "group chore")
        });
        assert_eq!(app.tasks.len(), 2);

        app.insert_created(task(4, "personal chore"));
        assert_eq!(app.focused_task_id(), Some(TaskId(4)));
    }

    #[test]
    fn new_task_text_is_trimmed_and_blank_ignored() {
        let mut app = App::new(true);
        app.new_task_input = TextInput::from_str("   ");
        assert_eq!(app.take_new_task_text(), None);

        app.new_task_input = TextInput::from_str("  water plants ");
        assert_eq!(app.take_new_task_text().as_deref(), Some("water plants"));
        assert!(app.new_task_input.value.is_empty());
    }

    #[test]
    fn removing_a_task_drops_its_session() {
        let mut app = app_with_tasks();
        app.begin_edit();
        app.remove_task(TaskId(2));
        assert!(!app.sync.has_open_fields());
        assert_eq!(app.focused_task_id(), Some(TaskId(1)));
    }
}
